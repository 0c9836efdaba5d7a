use std::fmt::Display;
use std::io::Write;

use qpack_format::{FromEntry, Package};

use crate::cli::{GetArgs, ValueKind};
use crate::error::{Error, Result};

use super::open_package;

/// Decode every value in the entry and join them with spaces, so a single
/// number prints as itself and an array prints on one line.
fn format_values<T: Display>(package: &Package, name: &str) -> Result<String>
where
    Vec<T>: FromEntry,
{
    let values = package
        .value::<Vec<T>>(name)
        .map_err(|source| Error::Lookup { source })?;

    Ok(values
        .iter()
        .map(|v| v.to_string())
        .collect::<Vec<_>>()
        .join(" "))
}

pub(crate) fn render(package: &Package, name: &str, kind: ValueKind) -> Result<Vec<u8>> {
    let text = match kind {
        ValueKind::Raw => {
            let bytes = package.get(name).map_err(|source| Error::Lookup { source })?;
            return Ok(bytes.to_vec());
        }
        ValueKind::U64 => format_values::<u64>(package, name)?,
        ValueKind::I64 => format_values::<i64>(package, name)?,
        ValueKind::F32 => format_values::<f32>(package, name)?,
        ValueKind::F64 => format_values::<f64>(package, name)?,
        ValueKind::Str => package
            .value::<String>(name)
            .map_err(|source| Error::Lookup { source })?,
    };

    Ok(format!("{}\n", text).into_bytes())
}

pub fn run(args: GetArgs) -> Result<()> {
    let package = open_package(&args.package)?;
    let out = render(&package, &args.name, args.kind)?;

    let stdout = std::io::stdout();
    let mut stdout = stdout.lock();
    stdout
        .write_all(&out)
        .and_then(|_| stdout.flush())
        .map_err(|source| Error::Stdout { source })
}
