use coverage_reconstruction::{
    CoverageSettings, OrthophotoCorners, Reconstruction, ReconstructionError,
};
use log::*;
use std::path::{Path, PathBuf};
use structopt::StructOpt;

#[derive(StructOpt, Clone)]
#[structopt(
    name = "coverage-report",
    about = "Outlines the ground covered by every shot of an OpenDroneMap project"
)]
struct Opt {
    /// The file where settings are specified.
    ///
    /// This is in the format of `coverage_reconstruction::CoverageSettings`.
    #[structopt(short, long, default_value = "coverage-settings.json")]
    settings: PathBuf,
    /// Output JSON file for the reconstruction and its shot footprints
    ///
    /// Defaults to `odm_report/shot_coverage/data/reconstruction_shots.json` in the project.
    #[structopt(short, long)]
    output: Option<PathBuf>,
    /// Export cameras and shots without computing footprints
    #[structopt(long)]
    skip_coverage: bool,
    /// The ODM project root folder
    #[structopt(parse(from_os_str))]
    project: PathBuf,
}

fn main() {
    pretty_env_logger::init_timed();
    let opt = Opt::from_args();

    let settings = std::fs::File::open(&opt.settings)
        .ok()
        .and_then(|file| serde_json::from_reader(file).ok());
    if settings.is_some() {
        info!("loaded existing settings");
    } else {
        info!("used default settings");
    }
    let settings: CoverageSettings = settings.unwrap_or_default();

    if let Err(e) = run(&opt, &settings) {
        error!("{}", e);
        std::process::exit(1);
    }
}

fn run(opt: &Opt, settings: &CoverageSettings) -> Result<(), ReconstructionError> {
    let data_dir = opt.project.join("odm_report/shot_coverage/data");
    let output = opt
        .output
        .clone()
        .unwrap_or_else(|| data_dir.join("reconstruction_shots.json"));

    let mut reconstruction = Reconstruction::load(&opt.project, settings)?;
    if opt.skip_coverage {
        info!("skipping shot coverage");
    } else {
        reconstruction.compute_shot_boundaries(settings.nb_slices);
    }

    create_parent(&output)?;
    info!("exporting the reconstruction to {}", output.display());
    reconstruction.to_record().save(&output)?;

    let corners = opt
        .project
        .join("odm_orthophoto/odm_orthophoto_corners.txt");
    if corners.exists() {
        let corners_output = output.with_file_name("odm_orthophoto_corners.json");
        info!("exporting orthophoto corners to {}", corners_output.display());
        OrthophotoCorners::read(&corners)?.save(&corners_output)?;
    } else {
        info!("no orthophoto corners at {}", corners.display());
    }

    info!("shot coverage completed");
    Ok(())
}

fn create_parent(path: &Path) -> Result<(), ReconstructionError> {
    match path.parent() {
        Some(dir) if !dir.as_os_str().is_empty() => {
            std::fs::create_dir_all(dir).map_err(|source| ReconstructionError::Io {
                path: dir.to_owned(),
                source,
            })
        }
        _ => Ok(()),
    }
}
