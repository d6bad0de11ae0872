//! String interning for identifiers.
//!
//! Every identifier the lexer sees is interned once; afterwards names are compared and hashed as
//! small integers. Equal strings always map to the same [`Name`] for the lifetime of the interner.

use std::collections::HashMap;
use std::rc::Rc;

/// Interned identity of an identifier spelling.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Name(u32);

impl Name {
    /// Position of this name in its interner's table.
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

/// Two-way map between identifier spellings and [`Name`]s.
#[derive(Debug, Default)]
pub struct Interner {
    map: HashMap<Rc<str>, Name>,
    strings: Vec<Rc<str>>,
}

impl Interner {
    pub fn new() -> Self {
        Self::default()
    }

    /// Intern `text`, returning the existing name if it was seen before.
    pub fn intern(&mut self, text: &str) -> Name {
        if let Some(&name) = self.map.get(text) {
            return name;
        }
        let name = Name(self.strings.len() as u32);
        let shared: Rc<str> = Rc::from(text);
        self.strings.push(Rc::clone(&shared));
        self.map.insert(shared, name);
        name
    }

    /// Look up a spelling without interning it.
    pub fn get(&self, text: &str) -> Option<Name> {
        self.map.get(text).copied()
    }

    /// Spelling of an interned name.
    ///
    /// Names from a different interner resolve to `"<unknown>"` instead of panicking.
    pub fn resolve(&self, name: Name) -> &str {
        self.strings.get(name.index()).map(|s| &**s).unwrap_or("<unknown>")
    }

    pub fn len(&self) -> usize {
        self.strings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.strings.is_empty()
    }
}
