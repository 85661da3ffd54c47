use anyhow::Result;
use std::path::PathBuf;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use photo_geomap::folder_picker::{DialogFolderSelector, FixedFolder, FolderSelector};
use photo_geomap::processing::{run, PipelineOptions};
use photo_geomap::settings::Settings;

const HELP: &str = "\
photo_geomap: put geotagged photos on an interactive map

USAGE:
  photo_geomap [OPTIONS] [FOLDER]

ARGS:
  FOLDER              Folder with .jpg/.jpeg/.png photos (opens a dialog when omitted)

OPTIONS:
  -o, --output FILE   Output HTML file [default from settings: my_map.html]
  -z, --zoom N        Initial zoom level
      --no-dialog     Never open the dialog; fall back to the last used folder
  -h, --help          Print this help
";

struct Args {
    folder: Option<PathBuf>,
    output: Option<PathBuf>,
    zoom: Option<u8>,
    no_dialog: bool,
}

fn parse_args() -> Result<Option<Args>> {
    let mut pargs = pico_args::Arguments::from_env();
    if pargs.contains(["-h", "--help"]) {
        print!("{}", HELP);
        return Ok(None);
    }

    let args = Args {
        output: pargs.opt_value_from_str(["-o", "--output"])?,
        zoom: pargs.opt_value_from_str(["-z", "--zoom"])?,
        no_dialog: pargs.contains("--no-dialog"),
        folder: pargs.opt_free_from_str()?,
    };

    let remaining = pargs.finish();
    if !remaining.is_empty() {
        warn!("⚠️  Ignoring unused arguments: {:?}", remaining);
    }
    Ok(Some(args))
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("photo_geomap=info")),
        )
        .init();

    let Some(args) = parse_args()? else {
        return Ok(());
    };

    let mut settings = Settings::load()?;
    if let Some(zoom) = args.zoom {
        settings.zoom = zoom;
    }

    let selector: Box<dyn FolderSelector> = match (args.folder, args.no_dialog) {
        (Some(folder), _) => Box::new(FixedFolder(Some(folder))),
        (None, true) => Box::new(FixedFolder(settings.last_folder_path())),
        (None, false) => Box::new(DialogFolderSelector::new(settings.last_folder_path())),
    };

    let options = PipelineOptions {
        view: settings.map_view(),
        output: args
            .output
            .unwrap_or_else(|| PathBuf::from(&settings.output_file)),
        thumbnail_quality: settings.thumbnail_quality,
    };

    info!("🗺️  Photo GeoMap starting...");
    let Some(summary) = run(selector.as_ref(), &options)? else {
        info!("Nothing to do, no map written");
        return Ok(());
    };

    settings.update_last_folder(&summary.folder);
    if let Err(e) = settings.save() {
        warn!("⚠️  Could not save settings: {:#}", e);
    }

    if summary.marked == 0 {
        info!("No photo carried usable GPS data, the map is empty");
    }
    info!(
        "🎉 Done! Open {} in a browser",
        options
            .output
            .canonicalize()
            .unwrap_or_else(|_| options.output.clone())
            .display()
    );

    Ok(())
}
