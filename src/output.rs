use super::*;
use std::fs::OpenOptions;
use std::io::BufWriter;
use std::io::prelude::*;

/// Radiograph output units for the plain-text writers.
pub struct OutputUnits {
    pub length_unit: f64,
}

/// Write the radiograph to `{name}radiograph.toml` (edges + matrix,
/// serialized via serde) and the count matrix alone to `{name}intensity.dat`
/// as whitespace-separated rows over (h-bin, v-bin).
pub fn write_radiograph(radiograph: &Radiograph, name: &str, units: &OutputUnits) -> Result<()> {

    let toml_output_file = OpenOptions::new()
        .write(true)
        .create(true)
        .truncate(true)
        .open(format!("{}{}", name, "radiograph.toml"))
        .context("Could not open radiograph output file.")?;
    let mut toml_stream = BufWriter::with_capacity(8000, toml_output_file);
    let toml = toml::to_string(radiograph).context("Could not serialize radiograph.")?;
    writeln!(toml_stream, "{}", toml)?;

    let matrix_output_file = OpenOptions::new()
        .write(true)
        .create(true)
        .truncate(true)
        .open(format!("{}{}", name, "intensity.dat"))
        .context("Could not open intensity output file.")?;
    let mut matrix_stream = BufWriter::with_capacity(8000, matrix_output_file);

    //Header: bin centers in output length units.
    let h_centers: Vec<String> = radiograph.h_edges.windows(2).into_iter()
        .map(|edge| format!("{}", (edge[0] + edge[1])/2./units.length_unit))
        .collect();
    writeln!(matrix_stream, "# h bin centers: {}", h_centers.join(" "))?;

    for row in radiograph.intensity.rows() {
        let formatted: Vec<String> = row.iter().map(|count| format!("{}", count)).collect();
        writeln!(matrix_stream, "{}", formatted.join(" "))?;
    }
    matrix_stream.flush()?;

    Ok(())
}

/// Print the run summary in the terminal.
pub fn print_summary(summary: &RunSummary, removed_by_mesh: &[usize]) {
    for (index, removed) in removed_by_mesh.iter().enumerate() {
        println!("Mesh {}: removed {} particles", index + 1, removed);
    }
    println!(
        "Traced {} particles: {} reached the detector, {} lost, {} failed",
        summary.total, summary.terminated, summary.lost, summary.failed
    );
}
