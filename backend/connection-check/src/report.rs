//! Console output and exit-code mapping

use dependency_health::{CheckReport, HealthStatus};
use std::io::{self, Write};

pub const BANNER: &str = "== Prueba de conexión a PostgreSQL y Redis ==";

pub const SUGGESTIONS: [&str; 4] = [
    "- Asegúrate de que los contenedores de Postgres y Redis están en ejecución.",
    "- Si ejecutas fuera de Docker, usa 'localhost' como host.",
    "- Si ejecutas dentro de Docker Compose, usa 'postgres' y 'redis' como hosts.",
    "- Exporta las variables requeridas: POSTGRES_USER, POSTGRES_PASSWORD, POSTGRES_DB.",
];

pub fn write_banner<W: Write>(out: &mut W) -> io::Result<()> {
    writeln!(out, "{}", BANNER)
}

/// One line per check, e.g. `[REDIS] Conexión OK a localhost:6379 (PING=PONG)`
pub fn write_report<W: Write>(out: &mut W, report: &CheckReport) -> io::Result<()> {
    writeln!(out, "{}", report)?;
    out.flush()
}

pub fn write_suggestions<W: Write>(out: &mut W) -> io::Result<()> {
    writeln!(out)?;
    writeln!(out, "Sugerencias:")?;
    for line in SUGGESTIONS {
        writeln!(out, "{}", line)?;
    }
    Ok(())
}

/// Process exit status: 0 when every dependency answered, 1 otherwise
pub fn exit_status(status: HealthStatus) -> u8 {
    match status {
        HealthStatus::Serving => 0,
        HealthStatus::NotServing => 1,
    }
}
