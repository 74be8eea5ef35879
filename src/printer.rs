//! Fully parenthesized prefix rendering of expression trees, e.g. `(* (- 123) (group 45.67))`.
//!
//! Two trees that print the same are treated as structurally equal in tests.

use crate::expr::Expr;

/// Pieces of output still to be written, popped from the back.
enum Work<'a> {
    Expr(&'a Expr),
    Text(&'a str),
}

/// Renders `expr` in prefix form.
/// Walks the tree with an explicit stack, so any depth the parser can build prints fine.
pub fn print(expr: &Expr) -> String {
    let mut output = String::new();
    let mut work = vec![Work::Expr(expr)];

    while let Some(item) = work.pop() {
        match item {
            Work::Text(text) => output.push_str(text),
            Work::Expr(Expr::Literal { value }) => output.push_str(&value.to_string()),
            Work::Expr(Expr::Binary { left, operator, right }) => {
                parenthesize(&mut work, &operator.lexeme, &[left.as_ref(), right.as_ref()]);
            },
            Work::Expr(Expr::Grouping { expression }) => {
                parenthesize(&mut work, "group", &[expression.as_ref()]);
            },
            Work::Expr(Expr::Unary { operator, right }) => {
                parenthesize(&mut work, &operator.lexeme, &[right.as_ref()]);
            },
        }
    }

    output
}

/// Schedules `(name expr...)` with single spaces between the parts.
fn parenthesize<'a>(work: &mut Vec<Work<'a>>, name: &'a str, exprs: &[&'a Expr]) {
    work.push(Work::Text(")"));
    for expr in exprs.iter().rev() {
        work.push(Work::Expr(*expr));
        work.push(Work::Text(" "));
    }
    work.push(Work::Text(name));
    work.push(Work::Text("("));
}
