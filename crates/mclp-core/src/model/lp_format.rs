//! CPLEX LP-format rendering of a [`Model`].

use std::fmt;

use super::{LinearExpr, Model, Sense, VarDomain};

// LP identifiers may not contain brackets: `y[3]` becomes `y_3`.
fn lp_name(name: &str) -> String {
    name.replace('[', "_").replace(']', "")
}

fn write_expr(f: &mut fmt::Formatter<'_>, model: &Model, expr: &LinearExpr) -> fmt::Result {
    if expr.is_empty() {
        let first = model.variables.first().map_or("x", |v| v.name.as_str());
        return write!(f, " 0 {}", lp_name(first));
    }
    for term in expr.terms() {
        let sign = if term.coefficient < 0.0 { '-' } else { '+' };
        let name = model
            .variable(term.var)
            .map_or_else(|| term.var.to_string(), |v| lp_name(&v.name));
        write!(f, " {sign} {} {name}", term.coefficient.abs())?;
    }
    Ok(())
}

impl fmt::Display for Model {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "\\ MCLP covering model: {} sites", self.site_count)?;
        match self.objective.sense {
            Sense::Maximize => writeln!(f, "Maximize")?,
            Sense::Minimize => writeln!(f, "Minimize")?,
        }
        write!(f, " obj:")?;
        write_expr(f, self, &self.objective.expr)?;
        writeln!(f)?;

        writeln!(f, "Subject To")?;
        for constraint in &self.constraints {
            write!(f, " {}:", lp_name(&constraint.name))?;
            write_expr(f, self, &constraint.expr)?;
            writeln!(f, " {} {}", constraint.op.symbol(), constraint.rhs)?;
        }

        writeln!(f, "Binary")?;
        for variable in &self.variables {
            match variable.domain {
                VarDomain::Binary => writeln!(f, " {}", lp_name(&variable.name))?,
            }
        }
        writeln!(f, "End")
    }
}
