//! Number scanning for the CACT lexer
//!
//! Literal forms:
//! - `0x`/`0X` followed by hex digits: int
//! - digits with a leading `0`: octal int
//! - other digits: decimal int
//! - digits with a `.` and/or an exponent: double, or float with an `f`/`F` suffix
//!
//! Ints are 32-bit. A literal up to `u32::MAX` is accepted and wraps into `i32` (so `0xFFFFFFFF`
//! is `-1`); anything wider is an error.

use super::Lexer;
use super::tokens::{Token, TokenKind};
use crate::frontend::context::Context;
use crate::frontend::diagnostics::errors;

impl<'a> Lexer<'a> {
    pub(super) fn scan_number(&mut self, ctx: &mut Context) -> Token {
        let start = self.pos;

        if self.peek() == Some(b'0') && matches!(self.peek_at(1), Some(b'x' | b'X')) {
            return self.scan_hex(ctx, start);
        }

        self.skip_digits();
        let mut is_real = false;

        if self.peek() == Some(b'.') {
            is_real = true;
            self.pos += 1;
            self.skip_digits();
        }

        if matches!(self.peek(), Some(b'e' | b'E')) {
            is_real = true;
            self.pos += 1;
            if matches!(self.peek(), Some(b'+' | b'-')) {
                self.pos += 1;
            }
            if !self.peek().is_some_and(|c| c.is_ascii_digit()) {
                return self.error_token(ctx, start, errors::bad_exponent);
            }
            self.skip_digits();
        }

        let text_end = self.pos;
        if matches!(self.peek(), Some(b'f' | b'F')) {
            self.pos += 1;
            if !is_real {
                return self.error_token(ctx, start, errors::int_with_float_suffix);
            }
            let text = &self.source[start..text_end];
            return match text.parse::<f32>() {
                Ok(v) => self.token(TokenKind::Float(v), start),
                Err(_) => self.error_token(ctx, start, errors::bad_float_literal),
            };
        }

        let text = &self.source[start..text_end];
        if is_real {
            return match text.parse::<f64>() {
                Ok(v) => self.token(TokenKind::Double(v), start),
                Err(_) => self.error_token(ctx, start, errors::bad_float_literal),
            };
        }

        let radix = if text.len() > 1 && text.starts_with('0') { 8 } else { 10 };
        if radix == 8 && text.bytes().any(|b| b == b'8' || b == b'9') {
            return self.error_token(ctx, start, errors::bad_octal_digit);
        }
        match parse_int(text, radix) {
            Some(v) => self.token(TokenKind::Int(v), start),
            None => self.error_token(ctx, start, errors::int_out_of_range),
        }
    }

    fn scan_hex(&mut self, ctx: &mut Context, start: usize) -> Token {
        self.pos += 2;
        let digits_start = self.pos;
        while self.peek().is_some_and(|c| c.is_ascii_hexdigit()) {
            self.pos += 1;
        }
        if self.pos == digits_start {
            return self.error_token(ctx, start, errors::bad_hex_literal);
        }
        match parse_int(&self.source[digits_start..self.pos], 16) {
            Some(v) => self.token(TokenKind::Int(v), start),
            None => self.error_token(ctx, start, errors::int_out_of_range),
        }
    }

    fn skip_digits(&mut self) {
        while self.peek().is_some_and(|c| c.is_ascii_digit()) {
            self.pos += 1;
        }
    }
}

/// Parse an unsigned literal and wrap it into `i32`; `None` if it does not fit in 32 bits.
fn parse_int(digits: &str, radix: u32) -> Option<i32> {
    let value = u32::from_str_radix(digits, radix).ok()?;
    Some(value as i32)
}
