//! Batch session.
//!
//! Runs the whole batch strictly in order: statements in file order,
//! parameter sets in declaration order, one blocking execution at a
//! time. Bindings and grids are values scoped to a single execution, so
//! nothing is shared between iterations. Any fatal error aborts the
//! batch immediately.

use std::io::Write;

use crate::binder::{BoundParameters, ParameterValue};
use crate::client::{Client, PreparedStatement};
use crate::config::{BatchConfig, StatementConfig};
use crate::error::Result;
use crate::formatter;
use crate::materialize::ResultGrid;
use crate::parser::SyntaxCategory;

/// One batch run over an open connection, echoing progress and reports
/// to the output sink.
pub struct Session<W: Write> {
    client: Client,
    out: W,
}

impl<W: Write> Session<W> {
    /// Echo the connection descriptor and connect
    pub fn connect(config: &BatchConfig, mut out: W) -> Result<Session<W>> {
        write_connection(&mut out, config)?;
        let client = Client::connect(config)?;
        Ok(Session { client, out })
    }

    /// Execute every statement in order, fail-fast
    pub fn run(&mut self, config: &BatchConfig) -> Result<()> {
        for (index, statement) in config.prepared_statements.iter().enumerate() {
            self.run_statement(index, statement)?;
        }
        Ok(())
    }

    fn run_statement(&mut self, index: usize, config: &StatementConfig) -> Result<()> {
        let stmt = self.client.prepare(&config.statement)?;
        writeln!(self.out, "Statement[{}]: {}", index, config.statement)?;

        let category = SyntaxCategory::classify(&config.statement);
        tracing::info!(statement = %config.statement, ?category, "statement classified");

        if config.parameter_sets.is_empty() {
            return self.execute_and_report(&stmt, category, &BoundParameters::empty());
        }

        for (set_index, set) in config.parameter_sets.iter().enumerate() {
            let params: Vec<ParameterValue> =
                set.iter().map(|spec| spec.to_parameter()).collect();
            let bound = BoundParameters::bind(&params, stmt.placeholder_count())?;
            writeln!(
                self.out,
                "Parameter[{}]: {}",
                set_index,
                formatter::parameter_echo(&params)
            )?;
            self.execute_and_report(&stmt, category, &bound)?;
        }
        Ok(())
    }

    fn execute_and_report(
        &mut self,
        stmt: &PreparedStatement,
        category: SyntaxCategory,
        bound: &BoundParameters,
    ) -> Result<()> {
        let outcome = self.client.execute(stmt, bound)?;
        let grid = match outcome.cursor {
            Some(mut cursor) => Some(ResultGrid::materialize(&mut cursor)?),
            None => None,
        };
        let report = formatter::render_report(category, outcome.affected, grid.as_ref())?;
        self.out.write_all(report.as_bytes())?;
        Ok(())
    }
}

fn write_connection<W: Write>(out: &mut W, config: &BatchConfig) -> Result<()> {
    writeln!(out, "User     : {}", config.user)?;
    writeln!(out, "Password : {}", config.password)?;
    writeln!(out, "Host     : {}", config.host)?;
    writeln!(out, "Port     : {}", config.port)?;
    writeln!(out, "Database : {}", config.database)?;
    writeln!(out)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_connection_echo_block() {
        let config = BatchConfig {
            user: "root".into(),
            password: "secret".into(),
            host: "127.0.0.1".into(),
            port: 3306,
            database: "employees".into(),
            prepared_statements: Vec::new(),
        };
        let mut out = Vec::new();
        write_connection(&mut out, &config).unwrap();
        let text = String::from_utf8(out).unwrap();
        assert_eq!(
            text,
            "User     : root\n\
             Password : secret\n\
             Host     : 127.0.0.1\n\
             Port     : 3306\n\
             Database : employees\n\n"
        );
    }
}
