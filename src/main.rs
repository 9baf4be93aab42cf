use libRustPRad::*;

use anyhow::{Context, Result};
use std::env;

fn main() -> Result<()> {
    env_logger::init();

    let args: Vec<String> = env::args().collect();
    let input_path = match args.len() {
        1 => "input.toml",
        2 => args[1].as_str(),
        _ => anyhow::bail!("Usage: RustPRad <input.toml>"),
    };

    let input_string = std::fs::read_to_string(input_path)
        .context(format!("Could not read input file {}.", input_path))?;
    let input = InputFile::new(&input_string)?;

    let length_unit = input.length_unit()?;
    let grid = input.field.build_grid(length_unit)?;

    let source = input::vector_from(input.geometry.source, length_unit);
    let detector = input::vector_from(input.geometry.detector, length_unit);

    let mut options = input.options.tracker.clone();
    options.print = true;
    let mut tracker = Tracker::new(&grid, source, detector, options)?;

    let species = input.particles.species.to_species()?;
    tracker.create_particles(
        input.particles.nparticles,
        input.particles.energy*EV,
        input.particles.energy_spread,
        input.particles.max_theta.to_radians(),
        species,
    )?;

    let mut removed_by_mesh = Vec::with_capacity(input.meshes.len());
    for mesh in &input.meshes {
        let removed = tracker.add_wire_mesh(
            mesh.location*length_unit,
            mesh.extent.to_aperture(length_unit),
            mesh.nwires.to_wire_count(),
            mesh.wire_diameter*length_unit,
            mesh.hdir.map(|h| input::vector_from(h, 1.)),
            mesh.vdir.map(|v| input::vector_from(v, 1.)),
        )?;
        removed_by_mesh.push(removed);
    }

    let summary = tracker.run(input.options.field_weighting, input.options.dt, input.options.max_steps)?;

    let radiograph = synthetic_radiograph(
        &tracker,
        (input.radiograph.size[0]*length_unit, input.radiograph.size[1]*length_unit),
        (input.radiograph.bins[0], input.radiograph.bins[1]),
        input.radiograph.ignore_grid,
    )?;

    output::print_summary(&summary, &removed_by_mesh);
    output::write_radiograph(&radiograph, &input.options.name, &OutputUnits {length_unit})?;
    println!("Finished!");

    Ok(())
}
