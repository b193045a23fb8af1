use std::path::PathBuf;

use anyhow::Context;
use pixmark::export::{self, LogNotifier};
use pixmark::script::Session;
use pixmark::{Editor, EditorConfig, capture};

const USAGE: &str = "usage: pixmark <input-image> <session.json> [output.png]";

fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let mut args = std::env::args_os().skip(1);
    let (Some(input), Some(session)) = (args.next(), args.next()) else {
        anyhow::bail!(USAGE);
    };
    let output = args.next().map(PathBuf::from);

    let config = EditorConfig::load();
    let session = Session::load(&PathBuf::from(session))?;
    let bitmap = capture::load_path(&PathBuf::from(input))?;

    let mut editor = Editor::new(config.history_depth).with_font(config.load_font());
    editor.load_image(&bitmap)?;
    session.replay(&mut editor, config.tool_config())?;

    match output {
        Some(path) => {
            export::save_png(editor.image(), &path)?;
            println!("{}", path.display());
        }
        None => {
            let dir = config
                .save_location
                .resolve()
                .context("no save directory available")?;
            let path = export::download(editor.image(), &dir, &mut LogNotifier)
                .context("saving result")?;
            println!("{}", path.display());
        }
    }
    Ok(())
}
