//! Type annotation parsing.
//!
//! ```text
//! type   := base dims?
//! base   := byte | int | long | float | double | string | bool | date | map
//!         | array ('.' base)?
//!         | record ('{' field (',' field)* '}')?
//!         | (bitmap | intmap) '{' bits (',' bits)* '}'
//!         | alias-name
//! dims   := '[' (expr? (',' expr?)*) ']'
//! bits   := name ':' int ('-' int)?
//! ```

use ebs_ir::{
    BitFieldSpec, BitWidth, FieldSpec, TokenKind, TypeKeyword, TypeSpec, TypeSpecKind,
};

use crate::{ParseError, Parser};

impl Parser<'_> {
    pub(crate) fn parse_type(&mut self) -> Result<TypeSpec, ParseError> {
        let array_prefix = self.eat(&TokenKind::Type(TypeKeyword::Array));
        let mut spec = if !array_prefix {
            self.parse_base_type()?
        } else if self.eat(&TokenKind::Dot) {
            // array.int[3] spells the element type first
            self.parse_base_type()?
        } else {
            // bare `array` holds any value
            TypeSpec::scalar(TypeSpecKind::Keyword(TypeKeyword::Array))
        };

        if self.check(&TokenKind::LBracket) {
            spec.dims = Some(self.parse_dims()?);
        } else if array_prefix {
            spec.dims = Some(vec![None]);
        }
        Ok(spec)
    }

    fn parse_base_type(&mut self) -> Result<TypeSpec, ParseError> {
        let kind = match self.current_kind() {
            TokenKind::Type(TypeKeyword::Record) => {
                self.advance();
                if self.check(&TokenKind::LBrace) {
                    TypeSpecKind::Record(self.parse_record_fields()?)
                } else {
                    TypeSpecKind::Keyword(TypeKeyword::Record)
                }
            }
            TokenKind::Type(TypeKeyword::Bitmap) => {
                self.advance();
                self.parse_bit_fields(BitWidth::Byte)?
            }
            TokenKind::Type(TypeKeyword::Intmap) => {
                self.advance();
                self.parse_bit_fields(BitWidth::Int)?
            }
            TokenKind::Type(TypeKeyword::Array) => {
                return Err(self.error("nested 'array' element types are written with dimensions"));
            }
            TokenKind::Type(keyword) => {
                let keyword = *keyword;
                self.advance();
                TypeSpecKind::Keyword(keyword)
            }
            TokenKind::Ident(name) => {
                let name = name.clone();
                self.advance();
                TypeSpecKind::Alias(name)
            }
            _ => return Err(self.error("expected a type")),
        };
        Ok(TypeSpec::scalar(kind))
    }

    fn parse_record_fields(&mut self) -> Result<Vec<FieldSpec>, ParseError> {
        self.expect(&TokenKind::LBrace, "'{' to start record fields")?;
        let mut fields: Vec<FieldSpec> = Vec::new();
        while !self.check(&TokenKind::RBrace) {
            let field_token = self.current();
            let name = self.expect_word("record field name")?;
            if fields.iter().any(|f| f.name == name) {
                return Err(ParseError::at(
                    field_token,
                    format!("duplicate record field '{name}'"),
                ));
            }
            self.expect(&TokenKind::Colon, "':' after the field name")?;
            let ty = self.parse_type()?;
            fields.push(FieldSpec { name, ty });
            if !self.eat(&TokenKind::Comma) {
                break;
            }
        }
        self.expect(&TokenKind::RBrace, "'}' to close record fields")?;
        Ok(fields)
    }

    fn parse_bit_fields(&mut self, width: BitWidth) -> Result<TypeSpecKind, ParseError> {
        self.expect(
            &TokenKind::LBrace,
            &format!("'{{' to start {} fields", width.keyword()),
        )?;
        let mut fields: Vec<BitFieldSpec> = Vec::new();
        while !self.check(&TokenKind::RBrace) {
            let field_token = self.current();
            let name = self.expect_word("bit field name")?;
            self.expect(&TokenKind::Colon, "':' after the bit field name")?;
            let start = self.parse_bit_index(width)?;
            let end = if self.eat(&TokenKind::Minus) {
                self.parse_bit_index(width)?
            } else {
                start
            };
            if end < start {
                return Err(ParseError::at(
                    field_token,
                    format!("bit range of '{name}' is reversed"),
                ));
            }
            let overlaps = fields
                .iter()
                .any(|f| f.name == name || (start <= f.end && f.start <= end));
            if overlaps {
                return Err(ParseError::at(
                    field_token,
                    format!("bit field '{name}' overlaps an earlier field"),
                ));
            }
            fields.push(BitFieldSpec { name, start, end });
            if !self.eat(&TokenKind::Comma) {
                break;
            }
        }
        self.expect(&TokenKind::RBrace, "'}' to close bit fields")?;
        Ok(TypeSpecKind::Bits { width, fields })
    }

    fn parse_bit_index(&mut self, width: BitWidth) -> Result<u8, ParseError> {
        let bit = match self.current_kind() {
            TokenKind::Int(n) => u8::try_from(*n).ok().filter(|b| *b < width.bits()),
            _ => return Err(self.error("expected a bit position")),
        };
        match bit {
            Some(bit) => {
                self.advance();
                Ok(bit)
            }
            None => Err(self.error(format!(
                "bit position must be between 0 and {}",
                width.bits() - 1
            ))),
        }
    }

    /// `[3]`, `[3, 4]`, `[]`, `[, 4]`.
    fn parse_dims(&mut self) -> Result<Vec<Option<ebs_ir::Expr>>, ParseError> {
        self.expect(&TokenKind::LBracket, "'['")?;
        let mut dims = Vec::new();
        loop {
            if self.check(&TokenKind::Comma) || self.check(&TokenKind::RBracket) {
                dims.push(None);
            } else {
                dims.push(Some(self.parse_expr()?));
            }
            if !self.eat(&TokenKind::Comma) {
                break;
            }
        }
        self.expect(&TokenKind::RBracket, "']' to close array dimensions")?;
        Ok(dims)
    }
}
