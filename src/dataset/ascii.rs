//! DAP2 ASCII response parsing.
//!
//! A constrained request such as `data.ascii?QCF.date,QCF.temp` answers with
//! an optional preamble, one header line naming the projected fields and then
//! one comma-separated line per row:
//!
//! ```text
//! Dataset: ESOP95_qcf.nc
//! QCF.date, QCF.temp
//! "2020/01/01", 10.0
//! ```

use anyhow::{anyhow, Result};

/// Parses a sequence table into one column per requested name.
pub fn parse_columns(body: &str, sequence: &str, names: &[&str]) -> Result<Vec<Vec<String>>> {
    let prefix = format!("{}.", sequence);
    let mut lines = body.lines();

    let header = lines
        .by_ref()
        .map(split_fields)
        .find(|fields| !fields.is_empty() && fields.iter().all(|f| f.starts_with(&prefix)))
        .ok_or_else(|| anyhow!("No `{}` header found in ASCII response", sequence))?;

    let header: Vec<&str> = header.iter().map(|f| &f[prefix.len()..]).collect();
    let positions = names
        .iter()
        .map(|name| {
            header
                .iter()
                .position(|h| h == name)
                .ok_or_else(|| anyhow!("Variable `{}` missing from ASCII response", name))
        })
        .collect::<Result<Vec<_>>>()?;

    let mut columns: Vec<Vec<String>> = vec![Vec::new(); names.len()];

    for (row, line) in lines.filter(|l| !l.trim().is_empty()).enumerate() {
        let fields = split_fields(line);
        if fields.len() != header.len() {
            return Err(anyhow!(
                "Row {} has {} fields, expected {}",
                row,
                fields.len(),
                header.len()
            ));
        }
        for (column, &pos) in columns.iter_mut().zip(&positions) {
            column.push(fields[pos].clone());
        }
    }

    Ok(columns)
}

// Splits on commas outside double quotes, trimming and unquoting each field.
fn split_fields(line: &str) -> Vec<String> {
    let line = line.trim();
    if line.is_empty() {
        return Vec::new();
    }

    let mut fields = Vec::new();
    let mut current = String::new();
    let mut quoted = false;

    for c in line.chars() {
        match c {
            '"' => quoted = !quoted,
            ',' if !quoted => fields.push(std::mem::take(&mut current).trim().to_string()),
            _ => current.push(c),
        }
    }
    fields.push(current.trim().to_string());

    fields
}

// -- Tests -------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    const BODY: &str = "Dataset: ESOP95_qcf.nc
QCF.date, QCF.time, QCF.temp
\"2020/01/01\", \"00:00:00\", 10.0
\"2020/01/01\", \"01:00:00\", -999.99

\"2020/01/01\", \"02:00:00\", 12.0
";

    #[test]
    fn should_parse_requested_columns() {
        let columns = parse_columns(BODY, "QCF", &["temp", "date"]).unwrap();

        assert_eq!(columns.len(), 2);
        assert_eq!(columns[0], vec!["10.0", "-999.99", "12.0"]);
        assert_eq!(columns[1][2], "2020/01/01");
    }

    #[test]
    fn should_skip_dds_preamble() {
        let body = "Dataset {\n    Sequence {\n        String date;\n    } QCF;\n} f;\n\
                    ---------------------------------------------\n\
                    QCF.date\n\"2020/01/01\"\n";
        let columns = parse_columns(body, "QCF", &["date"]).unwrap();

        assert_eq!(columns[0], vec!["2020/01/01"]);
    }

    #[test]
    fn should_keep_commas_inside_quotes() {
        let fields = split_fields("\"a, b\", 3");

        assert_eq!(fields, vec!["a, b".to_string(), "3".to_string()]);
    }

    #[test]
    fn should_fail_on_missing_variable() {
        let result = parse_columns(BODY, "QCF", &["pressure"]);

        assert!(result.is_err());
    }

    #[test]
    fn should_fail_on_ragged_row() {
        let body = "QCF.date, QCF.temp\n\"2020/01/01\"\n";
        let result = parse_columns(body, "QCF", &["date"]);

        assert!(result.is_err());
    }
}
