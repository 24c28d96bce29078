//! Statement parsing.
//!
//! Conditions of `if`, `while` and `do`/`while` are ordinary expressions,
//! so `if (x > 1)` and `if x > 1` produce the same tree. A `then` may follow
//! an `if` or `while` condition. Bodies of `if`/`while` are a block or a
//! single statement.

use ebs_ir::{
    Accessor, Assign, AssignOp, Block, Call, Expr, ExprKind, Literal, OpaqueStatement, Place,
    Stmt, StmtKind, TokenKind, VarDecl,
};
use ebs_stack::ensure_sufficient_stack;

use crate::{ParseError, Parser};

impl Parser<'_> {
    /// Parse one statement.
    pub(crate) fn parse_statement(&mut self) -> Result<Stmt, ParseError> {
        ensure_sufficient_stack(|| self.parse_statement_inner())
    }

    fn parse_statement_inner(&mut self) -> Result<Stmt, ParseError> {
        let line = self.current_line();
        let kind = match self.current_kind() {
            TokenKind::Var | TokenKind::Const => {
                let constant = self.advance().kind == TokenKind::Const;
                let decl = self.parse_var_decl(constant)?;
                self.expect_semicolon("declaration")?;
                StmtKind::VarDecl(decl)
            }
            TokenKind::Print => {
                self.advance();
                let value = self.parse_expr()?;
                self.expect_semicolon("print")?;
                StmtKind::Print(value)
            }
            TokenKind::Call | TokenKind::Hash => {
                self.advance();
                let call = self.parse_call_statement()?;
                self.expect_semicolon("call")?;
                StmtKind::Call(call)
            }
            TokenKind::Return => {
                self.advance();
                let value = if self.check(&TokenKind::Semicolon) {
                    None
                } else {
                    Some(self.parse_expr()?)
                };
                self.expect_semicolon("return")?;
                StmtKind::Return(value)
            }
            TokenKind::Break => {
                self.advance();
                self.expect_semicolon("break")?;
                StmtKind::Break
            }
            TokenKind::Continue => {
                self.advance();
                self.expect_semicolon("continue")?;
                StmtKind::Continue
            }
            TokenKind::If => self.parse_if()?,
            TokenKind::While => self.parse_while()?,
            TokenKind::Do => self.parse_do_while()?,
            TokenKind::For => self.parse_for()?,
            TokenKind::Foreach => self.parse_foreach()?,
            TokenKind::LBrace => StmtKind::Block(self.parse_block()?),
            TokenKind::Try => {
                self.advance();
                self.parse_try()?
            }
            TokenKind::Raise => {
                self.advance();
                self.parse_raise()?
            }
            TokenKind::Typedef => {
                self.advance();
                let name = self.expect_ident("type name after 'typedef'")?;
                self.expect(&TokenKind::Eq, "'=' after the type name")?;
                let ty = self.parse_type()?;
                self.expect_semicolon("typedef")?;
                StmtKind::Typedef { name, ty }
            }
            // name typeof type;
            TokenKind::Ident(_) if self.peek_kind(1) == &TokenKind::Typeof => {
                let name = self.expect_ident("type name")?;
                self.advance();
                let ty = self.parse_type()?;
                self.expect_semicolon("typedef")?;
                StmtKind::Typedef { name, ty }
            }
            TokenKind::Import => {
                self.advance();
                let TokenKind::Str(path) = self.current_kind() else {
                    return Err(self.error("expected a quoted file name after 'import'"));
                };
                self.advance();
                self.expect_semicolon("import")?;
                StmtKind::Import(path.clone())
            }
            // array.sort(xs); map.remove(m, "k");
            TokenKind::Type(_) if self.peek_kind(1) == &TokenKind::Dot => {
                let call = self.parse_call_statement()?;
                self.expect_semicolon("call")?;
                StmtKind::Call(call)
            }
            TokenKind::Ident(_) if self.is_opaque_at(self.cursor.position()) => {
                self.parse_opaque()?
            }
            TokenKind::Ident(_) => {
                if self.at_declaration() {
                    return Err(self.error("named blocks can only be declared at the top level"));
                }
                let kind = self.parse_simple_statement()?;
                self.expect_semicolon("statement")?;
                kind
            }
            _ => return Err(self.error("expected a statement")),
        };
        Ok(Stmt::new(kind, line))
    }

    /// `{ statements }`, opening a new scope at run time.
    pub(crate) fn parse_block(&mut self) -> Result<Block, ParseError> {
        self.expect(&TokenKind::LBrace, "'{'")?;
        self.block_depth += 1;
        let mut stmts = Vec::new();
        while !self.check(&TokenKind::RBrace) {
            if self.cursor.is_at_end() {
                return Err(self.error("expected '}' to close the block"));
            }
            stmts.push(self.parse_statement()?);
        }
        self.advance();
        self.block_depth -= 1;
        Ok(Block { stmts })
    }

    fn expect_semicolon(&mut self, after: &str) -> Result<(), ParseError> {
        self.expect(&TokenKind::Semicolon, &format!("';' after {after}"))?;
        Ok(())
    }

    /// A block or a single statement.
    fn parse_body(&mut self) -> Result<Stmt, ParseError> {
        if self.check(&TokenKind::LBrace) {
            let line = self.current_line();
            Ok(Stmt::new(StmtKind::Block(self.parse_block()?), line))
        } else {
            self.parse_statement()
        }
    }

    /// Loop body: a block, or a single statement treated as one.
    fn parse_loop_body(&mut self) -> Result<Block, ParseError> {
        if self.check(&TokenKind::LBrace) {
            self.parse_block()
        } else {
            Ok(Block {
                stmts: vec![self.parse_statement()?],
            })
        }
    }

    /// `name [: type] [= expr]`, after `var`/`let`/`const`.
    fn parse_var_decl(&mut self, constant: bool) -> Result<VarDecl, ParseError> {
        let name = self.expect_ident("variable name")?;
        let ty = if self.eat(&TokenKind::Colon) {
            Some(self.parse_type()?)
        } else {
            None
        };
        let init = if self.eat(&TokenKind::Eq) {
            Some(self.parse_expr()?)
        } else if constant {
            return Err(self.error(format!("constant '{name}' needs a value")));
        } else {
            None
        };
        Ok(VarDecl {
            name,
            ty,
            init,
            constant,
        })
    }

    /// Statement starting with an identifier: assignment or call.
    fn parse_simple_statement(&mut self) -> Result<StmtKind, ParseError> {
        let name_token = self.current();
        let root = self.expect_ident("variable or block name")?;
        let mut path = Vec::new();
        loop {
            match self.current_kind() {
                TokenKind::LBracket => {
                    self.advance();
                    let indices = self.parse_index_list()?;
                    path.push(Accessor::Index(indices));
                }
                TokenKind::Dot => {
                    self.advance();
                    path.push(Accessor::Field(self.expect_word("field name after '.'")?));
                }
                _ => break,
            }
        }

        if self.check(&TokenKind::LParen) {
            let mut name = root;
            for accessor in path {
                let Accessor::Field(part) = accessor else {
                    return Err(self.error("cannot call an indexed value"));
                };
                name.push('.');
                name.push_str(&part);
            }
            return Ok(StmtKind::Call(self.parse_call_args(name, name_token)?));
        }

        let target = Place { root, path };
        let op_line = self.current_line();
        let (op, value) = match self.current_kind() {
            TokenKind::Eq => (AssignOp::Set, None),
            TokenKind::PlusEq => (AssignOp::Add, None),
            TokenKind::MinusEq => (AssignOp::Sub, None),
            TokenKind::StarEq => (AssignOp::Mul, None),
            TokenKind::SlashEq => (AssignOp::Div, None),
            TokenKind::PlusPlus => (AssignOp::Add, Some(one(op_line))),
            TokenKind::MinusMinus => (AssignOp::Sub, Some(one(op_line))),
            _ => return Err(self.error("expected an assignment or a call")),
        };
        self.advance();
        let value = match value {
            Some(value) => value,
            None => self.parse_expr()?,
        };
        Ok(StmtKind::Assign(Assign { target, op, value }))
    }

    /// After `call` or `#`: `name[.name...] [(args)]`.
    pub(crate) fn parse_call_statement(&mut self) -> Result<Call, ParseError> {
        let name_token = self.current();
        let name = self.expect_call_name("block name after 'call'")?;
        if self.check(&TokenKind::LParen) {
            self.parse_call_args(name, name_token)
        } else {
            self.check_call(&name, &[], name_token)?;
            Ok(Call {
                name,
                args: Vec::new(),
            })
        }
    }

    fn parse_if(&mut self) -> Result<StmtKind, ParseError> {
        self.advance();
        let cond = self.parse_expr()?;
        self.eat(&TokenKind::Then);
        let then_branch = Box::new(self.parse_body()?);
        let else_branch = if self.eat(&TokenKind::Else) {
            Some(Box::new(self.parse_body()?))
        } else {
            None
        };
        Ok(StmtKind::If {
            cond,
            then_branch,
            else_branch,
        })
    }

    fn parse_while(&mut self) -> Result<StmtKind, ParseError> {
        self.advance();
        let cond = self.parse_expr()?;
        self.eat(&TokenKind::Then);
        let body = Box::new(self.parse_body()?);
        Ok(StmtKind::While { cond, body })
    }

    fn parse_do_while(&mut self) -> Result<StmtKind, ParseError> {
        self.advance();
        let body = self.parse_block()?;
        self.expect(&TokenKind::While, "'while' after the do block")?;
        let cond = self.parse_expr()?;
        self.eat(&TokenKind::Semicolon);
        Ok(StmtKind::DoWhile { body, cond })
    }

    /// `for (init; cond; step) body`, each clause optional.
    fn parse_for(&mut self) -> Result<StmtKind, ParseError> {
        self.advance();
        self.expect(&TokenKind::LParen, "'(' after 'for'")?;

        let init = if self.check(&TokenKind::Semicolon) {
            None
        } else {
            Some(Box::new(self.parse_for_clause()?))
        };
        self.expect(&TokenKind::Semicolon, "';' after the for initializer")?;

        let cond = if self.check(&TokenKind::Semicolon) {
            None
        } else {
            Some(self.parse_expr()?)
        };
        self.expect(&TokenKind::Semicolon, "';' after the for condition")?;

        let step = if self.check(&TokenKind::RParen) {
            None
        } else {
            Some(Box::new(self.parse_for_clause()?))
        };
        self.expect(&TokenKind::RParen, "')' to close the for header")?;

        let body = self.parse_loop_body()?;
        Ok(StmtKind::For {
            init,
            cond,
            step,
            body,
        })
    }

    fn parse_for_clause(&mut self) -> Result<Stmt, ParseError> {
        let line = self.current_line();
        let kind = if self.eat(&TokenKind::Var) {
            StmtKind::VarDecl(self.parse_var_decl(false)?)
        } else {
            self.parse_simple_statement()?
        };
        Ok(Stmt::new(kind, line))
    }

    /// `foreach x in expr body` or `foreach (x in expr) body`.
    fn parse_foreach(&mut self) -> Result<StmtKind, ParseError> {
        self.advance();
        let parenthesized = matches!(self.current_kind(), TokenKind::LParen)
            && matches!(self.peek_kind(1), TokenKind::Ident(_))
            && matches!(self.peek_kind(2), TokenKind::In);
        if parenthesized {
            self.advance();
        }
        let var = self.expect_ident("loop variable after 'foreach'")?;
        self.expect(&TokenKind::In, "'in' after the loop variable")?;
        let iterable = self.parse_expr()?;
        if parenthesized {
            self.expect(&TokenKind::RParen, "')' to close the foreach header")?;
        }
        let body = self.parse_loop_body()?;
        Ok(StmtKind::ForEach {
            var,
            iterable,
            body,
        })
    }

    /// Host statement: the keyword, then raw source text up to `;`.
    fn parse_opaque(&mut self) -> Result<StmtKind, ParseError> {
        let start = self.cursor.position();
        let keyword = self.advance();
        let end = self.statement_end(start);
        let tokens = self.cursor.tokens();
        if tokens[end].kind != TokenKind::Semicolon {
            self.cursor.set_position(end);
            return Err(self.error(format!(
                "expected ';' to end the '{}' statement",
                keyword.kind
            )));
        }
        let from = keyword.span.end as usize;
        let to = tokens[end].span.start as usize;
        let payload = self.source.get(from..to).unwrap_or("").trim().to_string();
        self.cursor.set_position(end + 1);
        Ok(StmtKind::Opaque(OpaqueStatement {
            keyword: keyword.kind.to_string(),
            payload,
        }))
    }
}

fn one(line: u32) -> Expr {
    Expr::new(ExprKind::Literal(Literal::Int(1)), line)
}
