//! Dataset Descriptor Structure parsing.
//!
//! Only the declarations of one named sequence are needed, e.g.
//!
//! ```text
//! Dataset {
//!     Sequence {
//!         String date;
//!         Float32 temp;
//!     } QCF;
//! } example.qcf;
//! ```

use anyhow::{anyhow, Result};

/// Returns the variable names declared directly inside `sequence`, in order.
pub fn sequence_variables(dds: &str, sequence: &str) -> Result<Vec<String>> {
    // One entry per open block: the names declared directly inside it.
    let mut blocks: Vec<Vec<String>> = Vec::new();

    for line in dds.lines().map(str::trim).filter(|l| !l.is_empty()) {
        if line.ends_with('{') {
            blocks.push(Vec::new());
        } else if let Some(rest) = line.strip_prefix('}') {
            let closed = blocks.pop().ok_or_else(|| anyhow!("Unbalanced `}}` in DDS"))?;
            let name = declared_name(rest);

            if name == sequence {
                return Ok(closed);
            }
            // A nested constructor is itself a variable of its parent.
            if let Some(parent) = blocks.last_mut() {
                parent.push(name.to_string());
            }
        } else if let Some(parent) = blocks.last_mut() {
            if let Some(name) = line.split_whitespace().nth(1) {
                parent.push(declared_name(name).to_string());
            }
        }
    }

    Err(anyhow!("Sequence `{}` not found in dataset", sequence))
}

// Strips the trailing `;` and any array shape from a declaration name.
fn declared_name(token: &str) -> &str {
    let token = token.trim().trim_end_matches(';');
    match token.find('[') {
        Some(pos) => token[..pos].trim(),
        None => token,
    }
}

// -- Tests -------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    const DDS: &str = "Dataset {
    Sequence {
        String date;
        String time;
        String date_nominal;
        String time_nominal;
        String network_name;
        String platform_name;
        Float32 latitude;
        Float32 longitude;
        Float32 elevation;
        Float32 temp;
        Float32 dew_point;
    } QCF;
} ESOP95_qcf.nc;
";

    #[test]
    fn should_list_sequence_variables_in_order() {
        let vars = sequence_variables(DDS, "QCF").unwrap();

        assert_eq!(vars.len(), 11);
        assert_eq!(vars[0], "date");
        assert_eq!(vars[8], "elevation");
        assert_eq!(vars[10], "dew_point");
    }

    #[test]
    fn should_fail_on_missing_sequence() {
        let result = sequence_variables(DDS, "NOPE");

        assert!(result.is_err());
    }

    #[test]
    fn should_strip_array_shapes() {
        let dds = "Dataset {\n  Sequence {\n    Float64 x[n = 3];\n  } QCF;\n} f;\n";
        let vars = sequence_variables(dds, "QCF").unwrap();

        assert_eq!(vars, vec!["x".to_string()]);
    }

    #[test]
    fn should_ignore_variables_outside_sequence() {
        let dds = "Dataset {\n  Int32 count;\n  Sequence {\n    String date;\n  } QCF;\n} f;\n";
        let vars = sequence_variables(dds, "QCF").unwrap();

        assert_eq!(vars, vec!["date".to_string()]);
    }
}
