use std::process::ExitCode;

use camera_extrinsics_prior::config::{Association, IngestConfig};
use camera_extrinsics_prior::data_loader::reconstruction_from_glob;
use camera_extrinsics_prior::io::{
    object_from_json, object_to_json, read_prior_store, write_bind_report,
};
use camera_extrinsics_prior::merge::merge_store_by_name;
use camera_extrinsics_prior::positional::read_extrinsics_file;
use camera_extrinsics_prior::reconstruction::{PriorView, ViewCollection};
use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(version, about, author)]
struct PriorToolCli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Parse an extrinsics file and summarize its records
    Inspect {
        /// path to extrinsics file
        path: String,

        /// dump the parsed priors to this json file
        #[arg(long)]
        json: Option<String>,
    },
    /// Apply an extrinsics file to views built from an image glob
    Bind {
        /// path to extrinsics file
        path: String,

        /// image glob, e.g. "images/*.jpg"
        #[arg(long)]
        images: String,

        /// match records to images by file name instead of by order
        #[arg(long)]
        by_name: bool,

        /// fail when some images get no prior
        #[arg(long)]
        strict: bool,

        /// ingest config json
        #[arg(long)]
        config: Option<String>,

        /// write a json report here
        #[arg(long)]
        report: Option<String>,
    },
}

fn run(cli: PriorToolCli) -> camera_extrinsics_prior::Result<bool> {
    match cli.command {
        Command::Inspect { path, json } => {
            let store = read_prior_store(&path)?;
            let complete = store.iter().filter(|(_, p)| p.is_complete()).count();
            println!("{}: {} priors, {} complete", path, store.len(), complete);
            if let Some(json) = json {
                object_to_json(&json, &store)?;
            }
            Ok(true)
        }
        Command::Bind {
            path,
            images,
            by_name,
            strict,
            config,
            report,
        } => {
            let mut ingest_config = match config {
                Some(config_path) => object_from_json::<IngestConfig>(&config_path)?,
                None => IngestConfig::default(),
            };
            if by_name {
                ingest_config.association = Association::ByName;
            }
            ingest_config.strict |= strict;
            log::info!("{:?}", ingest_config);

            let mut reconstruction = reconstruction_from_glob(&images)?;
            let complete = match ingest_config.association {
                Association::Positional => {
                    let bind_report = read_extrinsics_file(&path, &mut reconstruction)?;
                    println!("applied {} ({:?})", bind_report.applied, bind_report.status);
                    if let Some(report) = &report {
                        write_bind_report(report, &path, &bind_report)?;
                    }
                    if bind_report.is_truncated() {
                        log::warn!("extrinsics input was truncated");
                    }
                    bind_report.is_complete()
                }
                Association::ByName => {
                    let store = read_prior_store(&path)?;
                    let merge_report = merge_store_by_name(
                        &store,
                        &mut reconstruction,
                        ingest_config.mark_estimated,
                    );
                    println!(
                        "matched {}, updated {}, unmatched {:?}",
                        merge_report.matched, merge_report.updated, merge_report.unmatched
                    );
                    if let Some(report) = &report {
                        write_bind_report(report, &path, &merge_report)?;
                    }
                    if !merge_report.unmatched.is_empty() {
                        log::warn!("{} images have no prior", merge_report.unmatched.len());
                    }
                    merge_report.unmatched.is_empty()
                }
            };
            for view_id in reconstruction.view_ids() {
                if let Some(view) = reconstruction.view(view_id) {
                    let camera = view.camera();
                    println!(
                        "{} estimated={} position={:?} rvec={:?}",
                        view.name(),
                        view.is_estimated(),
                        camera.position.as_slice(),
                        camera.rvec().as_slice()
                    );
                }
            }
            Ok(complete || !ingest_config.strict)
        }
    }
}

fn main() -> ExitCode {
    env_logger::init();
    let cli = PriorToolCli::parse();
    match run(cli) {
        Ok(true) => ExitCode::SUCCESS,
        Ok(false) => {
            log::error!("strict mode: not every image received a prior");
            ExitCode::FAILURE
        }
        Err(e) => {
            log::error!("{}", e);
            ExitCode::FAILURE
        }
    }
}
