use crate::ast::{Expression, Program, Statement};

/// Renders a [`Program`] in parenthesised prefix form, e.g.
/// `(main (return 4))`.
pub struct AstPrinter;

impl AstPrinter {
    pub fn print(program: &Program) -> String {
        let mut s = String::from("(main");

        for stmt in &program.statements {
            s.push(' ');
            s.push_str(&Self::statement(stmt));
        }

        s.push(')');
        s
    }

    fn statement(stmt: &Statement) -> String {
        match stmt {
            Statement::Return(expr) => format!("(return {})", Self::expression(expr)),
        }
    }

    fn expression(expr: &Expression) -> String {
        match expr {
            // ── literals ────────────────────────────────────────────────
            Expression::Number(token) => token.content.clone(),
        }
    }
}
