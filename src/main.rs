use clap::Parser;
use log::error;
use objview::io::obj_loader::load_obj;
use objview::scene::buffers::{edge_indices, position_buffer};
use objview::scene::describe::describe;
use objview::scene::normalize::normalize_model;
use std::path::PathBuf;
use std::process::ExitCode;

/// Inspect a Wavefront OBJ file: parse it, fit it to the unit cube and
/// print a summary of its contents.
#[derive(Parser)]
#[command(version, about)]
struct Args {
    /// Path to the .obj file.
    model: PathBuf,

    /// Keep the original coordinates instead of fitting the unit cube.
    #[arg(long)]
    no_normalize: bool,

    /// Also report the sizes of the flattened render buffers.
    #[arg(long)]
    buffers: bool,
}

fn main() -> ExitCode {
    env_logger::init();
    let args = Args::parse();

    let mut model = match load_obj(&args.model) {
        Ok(model) => model,
        Err(e) => {
            error!("Failed to load model '{}': {}", args.model.display(), e);
            eprintln!("error: {e}");
            return ExitCode::FAILURE;
        }
    };

    if !args.no_normalize {
        let (center, scale) = normalize_model(&mut model);
        println!("Model normalized. Center: {:?}, Scale: {:.4}", center, scale);
    }

    print!("{}", describe(&model));

    if args.buffers {
        let positions = position_buffer(&model);
        let edges = edge_indices(&model);
        println!(
            "position buffer: {} floats ({} vertices)",
            positions.len(),
            positions.len() / 3
        );
        println!(
            "edge buffer:     {} indices ({} segments)",
            edges.len(),
            edges.len() / 2
        );
    }

    ExitCode::SUCCESS
}
