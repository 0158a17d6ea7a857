//! W3D Mesher CLI
//!
//! Convert a 3DS or OBJ scene into a packed-mesh JavaScript module.

use clap::{Parser, ValueEnum};
use std::path::PathBuf;
use w3d_mesher::{convert_file, ConvertConfig, IndexBase};

#[derive(Parser)]
#[command(name = "w3d-mesher")]
#[command(
    author,
    version,
    about = "Convert 3DS and OBJ scenes to web-usable packed meshes",
    long_about = None
)]
struct Cli {
    /// Source scene (.3ds or .obj)
    source: PathBuf,

    /// Destination module file
    destination: PathBuf,

    /// How OBJ face indices are numbered
    #[arg(long, value_enum, default_value = "one")]
    index_base: IndexBaseArg,

    /// Do not generate normals for OBJ meshes without per-vertex normals
    #[arg(long)]
    no_obj_normals: bool,

    /// Name of the exported constant
    #[arg(long, default_value = "w3d")]
    export_name: String,
}

#[derive(Copy, Clone, PartialEq, Eq, ValueEnum)]
enum IndexBaseArg {
    /// 1-based, as the OBJ format defines
    One,
    /// Use indices exactly as written
    AsWritten,
}

impl From<IndexBaseArg> for IndexBase {
    fn from(arg: IndexBaseArg) -> Self {
        match arg {
            IndexBaseArg::One => IndexBase::OneBased,
            IndexBaseArg::AsWritten => IndexBase::AsWritten,
        }
    }
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();

    let config = ConvertConfig::default()
        .with_index_base(cli.index_base.into())
        .with_obj_normals(!cli.no_obj_normals)
        .with_export_name(cli.export_name);

    log::info!("Converting {:?} -> {:?}", cli.source, cli.destination);

    let summary = convert_file(&cli.source, &cli.destination, &config).map_err(|e| {
        log::error!("Failed to convert {:?}: {}", cli.source, e);
        e
    })?;

    log::info!(
        "  {} meshes, {} vertices, {} triangles",
        summary.mesh_count,
        summary.vertex_count,
        summary.face_count
    );
    println!(
        "{} created. {} bytes",
        cli.destination.display(),
        summary.bytes_written
    );

    Ok(())
}
