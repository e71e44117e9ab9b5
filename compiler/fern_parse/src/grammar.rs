//! Expression and definition grammar.
//!
//! Precedence, low to high: lambda, additive (`+` `-`), multiplicative
//! (`*` `/`), unary minus, postfix call, primary. All binary operators are
//! left-associative.
//!
//! Minus policy: in operand position `-` is unary negation; in infix
//! position (after a complete operand) `-` is always binary, regardless of
//! surrounding whitespace.

use crate::recovery::{synchronize, synchronize_close_round, DEF_BOUNDARY};
use crate::Parser;
use fern_ir::{
    BinaryOp, Def, Expr, ExprId, ExprKind, Item, MalformedReason, Param, SourceFile, Span,
    TokenKind, UnaryOp,
};

impl Parser<'_> {
    /// Parse the root expression of an `expr` unit, including the
    /// trailing-token check.
    pub(crate) fn parse_expr_root(&mut self) -> ExprId {
        self.skip_newlines();
        let root = if self.cursor.is_at_end() {
            self.malformed(MalformedReason::ExpectedExpr, self.cursor.current_span())
        } else {
            self.parse_expr()
        };
        self.skip_newlines();
        if !self.cursor.is_at_end() && !self.produced_malformed {
            let span = self.cursor.current_span();
            self.diagnostics.push(
                fern_diagnostic::Diagnostic::error(
                    fern_diagnostic::Category::ParseError,
                    "Unexpected tokens after the end of the expression.",
                    span,
                )
                .with_code(MalformedReason::ExprUnexpectedToken.code()),
            );
        }
        root
    }

    /// Parse a whole file unit.
    pub(crate) fn parse_file(&mut self) -> SourceFile {
        let mut items = Vec::new();
        loop {
            self.skip_newlines();
            if self.cursor.is_at_end() {
                break;
            }
            items.push(self.parse_item());
        }
        SourceFile { items }
    }

    /// Parse one top-level item: `name = expr` up to the next newline.
    fn parse_item(&mut self) -> Item {
        let (name, name_span) = match self.cursor.current_kind() {
            TokenKind::LowerIdent(name) => {
                let span = self.cursor.current_span();
                self.cursor.advance();
                (name, span)
            }
            _ => {
                let span = self.cursor.current_span();
                let id = self.malformed(MalformedReason::ExpectedDefName, span);
                synchronize(&mut self.cursor, DEF_BOUNDARY);
                return Item::Malformed(id);
            }
        };

        if !matches!(self.cursor.current_kind(), TokenKind::Equals) {
            let span = self.cursor.current_span();
            let id = self.malformed(MalformedReason::ExpectedDefEquals, span);
            synchronize(&mut self.cursor, DEF_BOUNDARY);
            return Item::Malformed(id);
        }
        self.cursor.advance();
        self.skip_newlines();

        let body = self.parse_expr();
        let body_span = self.arena.get(body).span;

        // Junk between the body and the line break gets one diagnostic,
        // then the item boundary resynchronizes.
        if !matches!(
            self.cursor.current_kind(),
            TokenKind::Newline | TokenKind::EndOfFile
        ) {
            let span = self.cursor.current_span();
            self.diagnostics.push(
                fern_diagnostic::Diagnostic::error(
                    fern_diagnostic::Category::ParseError,
                    "Unexpected tokens after the end of the definition.",
                    span,
                )
                .with_code(MalformedReason::ExprUnexpectedToken.code()),
            );
            synchronize(&mut self.cursor, DEF_BOUNDARY);
        }

        Item::Def(Def {
            name,
            name_span,
            body,
            span: name_span.merge(body_span),
        })
    }

    /// Parse an expression.
    pub(crate) fn parse_expr(&mut self) -> ExprId {
        if matches!(self.cursor.current_kind(), TokenKind::Backslash) {
            self.parse_lambda()
        } else {
            self.parse_additive()
        }
    }

    /// `+` / `-`, left-associative.
    fn parse_additive(&mut self) -> ExprId {
        let mut left = self.parse_multiplicative();
        loop {
            let op = match self.cursor.current_kind() {
                TokenKind::OpPlus => BinaryOp::Add,
                TokenKind::OpMinus => BinaryOp::Sub,
                _ => break,
            };
            self.cursor.advance();
            // The expression cannot end on a dangling operator, so a line
            // break here is a continuation.
            self.skip_newlines();
            let right = self.parse_multiplicative();
            left = self.alloc_binary(op, left, right);
        }
        left
    }

    /// `*` / `/`, left-associative.
    fn parse_multiplicative(&mut self) -> ExprId {
        let mut left = self.parse_unary();
        loop {
            let op = match self.cursor.current_kind() {
                TokenKind::OpStar => BinaryOp::Mul,
                TokenKind::OpSlash => BinaryOp::Div,
                _ => break,
            };
            self.cursor.advance();
            self.skip_newlines();
            let right = self.parse_unary();
            left = self.alloc_binary(op, left, right);
        }
        left
    }

    fn alloc_binary(&mut self, op: BinaryOp, left: ExprId, right: ExprId) -> ExprId {
        let span = self.arena.get(left).span.merge(self.arena.get(right).span);
        self.arena.alloc_expr(Expr::new(
            ExprKind::Binary { op, left, right },
            span,
        ))
    }

    /// Unary minus (operand position only).
    fn parse_unary(&mut self) -> ExprId {
        if matches!(self.cursor.current_kind(), TokenKind::OpMinus) {
            let op_span = self.cursor.current_span();
            self.cursor.advance();
            let operand = self.parse_unary();
            let span = op_span.merge(self.arena.get(operand).span);
            self.arena.alloc_expr(Expr::new(
                ExprKind::Unary {
                    op: UnaryOp::Neg,
                    operand,
                },
                span,
            ))
        } else {
            self.parse_postfix()
        }
    }

    /// Postfix call chains: `f(a, b)(c)`.
    fn parse_postfix(&mut self) -> ExprId {
        let mut expr = self.parse_primary();
        while matches!(self.cursor.current_kind(), TokenKind::OpenRound) {
            self.cursor.advance();
            match self.parse_round_elements() {
                Ok((items, close_span)) => {
                    let args = self.arena.alloc_range(&items);
                    let span = self.arena.get(expr).span.merge(close_span);
                    expr = self
                        .arena
                        .alloc_expr(Expr::new(ExprKind::Call { func: expr, args }, span));
                }
                Err(malformed) => return malformed,
            }
        }
        expr
    }

    /// Primary expressions.
    fn parse_primary(&mut self) -> ExprId {
        let span = self.cursor.current_span();
        match self.cursor.current_kind() {
            TokenKind::Int(name) => {
                self.cursor.advance();
                self.arena.alloc_expr(Expr::new(ExprKind::Int(name), span))
            }
            TokenKind::LowerIdent(name) => {
                self.cursor.advance();
                self.arena
                    .alloc_expr(Expr::new(ExprKind::LowerIdent(name), span))
            }
            TokenKind::UpperIdent(name) => {
                self.cursor.advance();
                self.arena
                    .alloc_expr(Expr::new(ExprKind::UpperIdent(name), span))
            }
            TokenKind::OpenRound => self.parse_group(),
            TokenKind::Backslash => self.parse_lambda(),
            // Tokens that legitimately close or separate an enclosing
            // construct are not consumed; the caller's recovery sees them.
            TokenKind::EndOfFile
            | TokenKind::CloseRound
            | TokenKind::Comma
            | TokenKind::Newline => self.malformed(MalformedReason::ExpectedExpr, span),
            _ => {
                self.cursor.advance();
                self.malformed(MalformedReason::ExprUnexpectedToken, span)
            }
        }
    }

    /// `( ... )`: a transparent group for one element, a tuple otherwise.
    fn parse_group(&mut self) -> ExprId {
        let open_span = self.cursor.current_span();
        self.cursor.advance();
        self.skip_newlines();

        if matches!(self.cursor.current_kind(), TokenKind::CloseRound) {
            let close_span = self.cursor.current_span();
            self.cursor.advance();
            let items = self.arena.alloc_range(&[]);
            return self.arena.alloc_expr(Expr::new(
                ExprKind::Tuple { items },
                open_span.merge(close_span),
            ));
        }

        let first = self.parse_expr();
        self.skip_newlines();
        match self.cursor.current_kind() {
            TokenKind::CloseRound => {
                // Plain group: parentheses are dropped; the inner node is
                // the result.
                self.cursor.advance();
                first
            }
            TokenKind::Comma => {
                let mut items = vec![first];
                match self.parse_round_rest(&mut items) {
                    Ok(close_span) => {
                        let range = self.arena.alloc_range(&items);
                        self.arena.alloc_expr(Expr::new(
                            ExprKind::Tuple { items: range },
                            open_span.merge(close_span),
                        ))
                    }
                    Err(malformed) => malformed,
                }
            }
            _ => {
                let span = self.cursor.current_span();
                let id = self.malformed(MalformedReason::ExpectedExprCloseRoundOrComma, span);
                synchronize_close_round(&mut self.cursor);
                id
            }
        }
    }

    /// Comma-separated elements up to the closing `)`. The opening `(` and
    /// any first element have been consumed.
    fn parse_round_elements(&mut self) -> Result<(Vec<ExprId>, Span), ExprId> {
        self.skip_newlines();
        if matches!(self.cursor.current_kind(), TokenKind::CloseRound) {
            let close_span = self.cursor.current_span();
            self.cursor.advance();
            return Ok((Vec::new(), close_span));
        }
        let mut items = vec![self.parse_expr()];
        let close_span = self.parse_round_rest(&mut items)?;
        Ok((items, close_span))
    }

    /// Continue a comma-separated list after its first element; returns the
    /// span of the consumed `)`.
    fn parse_round_rest(&mut self, items: &mut Vec<ExprId>) -> Result<Span, ExprId> {
        loop {
            self.skip_newlines();
            match self.cursor.current_kind() {
                TokenKind::Comma => {
                    self.cursor.advance();
                    self.skip_newlines();
                    // Trailing comma before `)`.
                    if matches!(self.cursor.current_kind(), TokenKind::CloseRound) {
                        let close_span = self.cursor.current_span();
                        self.cursor.advance();
                        return Ok(close_span);
                    }
                    items.push(self.parse_expr());
                }
                TokenKind::CloseRound => {
                    let close_span = self.cursor.current_span();
                    self.cursor.advance();
                    return Ok(close_span);
                }
                _ => {
                    let span = self.cursor.current_span();
                    let id =
                        self.malformed(MalformedReason::ExpectedExprCloseRoundOrComma, span);
                    synchronize_close_round(&mut self.cursor);
                    return Err(id);
                }
            }
        }
    }

    /// `\x, y -> body`.
    fn parse_lambda(&mut self) -> ExprId {
        let backslash_span = self.cursor.current_span();
        self.cursor.advance();

        let mut params = Vec::new();
        match self.cursor.current_kind() {
            TokenKind::LowerIdent(name) => {
                params.push(Param {
                    name,
                    span: self.cursor.current_span(),
                });
                self.cursor.advance();
            }
            _ => {
                let span = self.cursor.current_span();
                return self.malformed(MalformedReason::ExpectedLambdaParam, span);
            }
        }
        while matches!(self.cursor.current_kind(), TokenKind::Comma) {
            self.cursor.advance();
            match self.cursor.current_kind() {
                TokenKind::LowerIdent(name) => {
                    params.push(Param {
                        name,
                        span: self.cursor.current_span(),
                    });
                    self.cursor.advance();
                }
                _ => {
                    let span = self.cursor.current_span();
                    return self.malformed(MalformedReason::ExpectedLambdaParam, span);
                }
            }
        }

        if !matches!(self.cursor.current_kind(), TokenKind::Arrow) {
            let span = self.cursor.current_span();
            return self.malformed(MalformedReason::ExpectedArrow, span);
        }
        self.cursor.advance();
        self.skip_newlines();

        let body = self.parse_expr();
        let span = backslash_span.merge(self.arena.get(body).span);
        let param_range = self.arena.alloc_params(&params);
        self.arena.alloc_expr(Expr::new(
            ExprKind::Lambda {
                params: param_range,
                body,
            },
            span,
        ))
    }

    pub(crate) fn skip_newlines(&mut self) {
        while matches!(self.cursor.current_kind(), TokenKind::Newline) {
            self.cursor.advance();
        }
    }
}
