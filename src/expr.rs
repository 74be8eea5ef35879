use std::mem;

use crate::token;

/// An expression tree. Every node owns its children.
///
/// Long operator chains build trees thousands of levels deep, so dropping is done with an explicit
/// stack. The derived `Clone`, `Debug` and `PartialEq` still recurse once per level and are only
/// meant for the small trees built in tests.
#[derive(Clone, Debug, PartialEq)]
pub enum Expr {
    Binary {
        left: Box<Expr>,
        operator: token::Token,  // Arithmetic, comparison or equality operator.
        right: Box<Expr>,
    },
    Grouping {
        expression: Box<Expr>,
    },
    Literal {
        value: token::Literal,
    },
    Unary {
        operator: token::Token,  // Either `!` or `-`.
        right: Box<Expr>,
    },
}

impl Drop for Expr {
    fn drop(&mut self) {
        let mut pending: Vec<Box<Expr>> = Vec::new();
        detach_children(self, &mut pending);

        while let Some(mut expr) = pending.pop() {
            // `expr` is left with leaf children only, so dropping it here stays shallow.
            detach_children(&mut expr, &mut pending);
        }
    }
}

/// Moves every non-leaf child of `expr` into `pending`, leaving `nil` literals in their place.
fn detach_children(expr: &mut Expr, pending: &mut Vec<Box<Expr>>) {
    match expr {
        Expr::Binary { left, right, .. } => {
            detach(left, pending);
            detach(right, pending);
        },
        Expr::Grouping { expression } => detach(expression, pending),
        Expr::Unary { right, .. } => detach(right, pending),
        Expr::Literal { .. } => (),
    }
}

fn detach(child: &mut Box<Expr>, pending: &mut Vec<Box<Expr>>) {
    if !matches!(**child, Expr::Literal { .. }) {
        let leaf = Box::new(Expr::Literal { value: token::Literal::Nil });
        pending.push(mem::replace(child, leaf));
    }
}
