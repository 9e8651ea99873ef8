pub mod series;
pub mod surface;

use std::path::Path;

use anyhow::{anyhow, Result};
use tracing::info;

pub use series::series;
pub use surface::surface;

use super::create_progress_bar;

/// Renders each plot to its own file in the current directory.
fn save_plots<P>(
    plots: &[P],
    file_name: impl Fn(&P) -> String,
    render: impl Fn(&Path, &P) -> Result<()>,
) -> Result<Vec<String>> {
    let pb = create_progress_bar(plots.len() as u64, "Creating plots...".to_string());
    let mut saved = Vec::with_capacity(plots.len());

    for plot in plots {
        let name = file_name(plot);
        render(Path::new(&name), plot)?;
        info!(file = %name, "saved plot");

        pb.println(format!(
            "Plot saved in the current directory with the name {}",
            name
        ));
        pb.inc(1);
        saved.push(name);
    }
    pb.finish_with_message("Plots created");

    Ok(saved)
}

/// Splits fetched columns into exactly `N` named vectors.
fn exactly<const N: usize>(columns: Vec<Vec<String>>) -> Result<[Vec<String>; N]> {
    let found = columns.len();
    columns
        .try_into()
        .map_err(|_| anyhow!("Expected {} columns, received {}", N, found))
}

// -- Tests -------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use std::fs;

    use tempfile::TempDir;

    use super::*;

    #[test]
    fn should_split_exact_columns() {
        let columns = vec![vec!["a".to_string()], vec!["b".to_string()]];
        let [first, second] = exactly::<2>(columns).unwrap();

        assert_eq!(first, vec!["a"]);
        assert_eq!(second, vec!["b"]);
        assert!(exactly::<3>(vec![vec![]]).is_err());
    }

    #[test]
    fn should_save_each_plot_under_its_name() {
        let dir = TempDir::new().unwrap();
        let plots = vec!["one", "two"];

        let saved = save_plots(
            &plots,
            |p| dir.path().join(format!("{}.txt", p)).to_string_lossy().to_string(),
            |path, p| Ok(fs::write(path, p)?),
        )
        .unwrap();

        assert_eq!(saved.len(), 2);
        assert_eq!(fs::read_to_string(&saved[1]).unwrap(), "two");
    }

    #[test]
    fn should_stop_at_first_render_failure() {
        let plots = vec![1, 2, 3];

        let result = save_plots(
            &plots,
            |p| format!("{}.png", p),
            |_, p| if *p == 2 { Err(anyhow!("degenerate")) } else { Ok(()) },
        );

        assert!(result.is_err());
    }
}
