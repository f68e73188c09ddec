mod args;
mod types;

use std::time::Instant;

use ansi_term::Colour;
use args::{BehaviorArgs, InputArgs, OutputArgs};
use clap::Parser;

use wirepack::{BuildError, Bundler, BundlerOptions, OutputAsset};

#[derive(Parser)]
#[command(version, about, long_about = None)]
struct Commands {
  #[clap(flatten)]
  input: InputArgs,

  #[clap(flatten)]
  output: OutputArgs,

  #[clap(flatten)]
  behavior: BehaviorArgs,
}

fn print_output_assets(dir: &str, outputs: Vec<OutputAsset>) {
  let mut left = 0;
  let mut right = 0;

  let mut assets = Vec::with_capacity(outputs.len());

  for output in outputs {
    let size = format!("{:.2}", output.content.len() as f64 / 1024.0);
    let is_chunk = output.filename.ends_with(".js") || output.filename.ends_with(".css");

    if size.len() > right {
      right = size.len();
    }

    if output.filename.len() > left {
      left = output.filename.len()
    }

    assets.push((output.filename, size, is_chunk));
  }

  let dim = Colour::White.dimmed();
  let color = Colour::Cyan;
  let prefix = format!("{dir}/");

  for (filename, size, is_chunk) in assets {
    let asset_type = if is_chunk { "chunk" } else { "asset" };
    let filename_len = filename.len();

    println!(
      "{}{}{:left$} {}{}{:right$}{} kB",
      dim.paint(prefix.as_str()),
      color.paint(filename),
      "",
      dim.paint(asset_type),
      dim.paint(" │ size: "),
      "",
      size,
      left = left - filename_len,
      right = right - size.len()
    )
  }
}

fn print_errors(errors: &BuildError) {
  for error in &**errors {
    println!("{} {error}", Colour::Red.paint("Error:"));
  }
}

fn main() {
  let args = Commands::parse();
  let InputArgs { cwd, input, mode } = args.input;
  let input = input.map(|files| files.iter().map(|p| p.to_string_lossy().into()).collect());

  let mut bundler = Bundler::new(BundlerOptions {
    cwd,
    input,
    mode: mode.map(Into::into),
    dir: args.output.dir,
    public_path: args.output.public_path,
    entry_filenames: args.output.entry_filenames,
    css_filenames: args.output.css_filenames,
    asset_filenames: args.output.asset_filenames,
    ..Default::default()
  });

  if args.behavior.show_config {
    match serde_json::to_string_pretty(bundler.options().as_ref()) {
      Ok(config) => println!("{config}"),
      Err(error) => println!("{} {error}", Colour::Red.paint("Error:")),
    }
    return;
  }

  if args.behavior.check {
    match bundler.check() {
      Ok(()) => println!("{} Configuration is valid", Colour::Green.paint("✔")),
      Err(errors) => {
        print_errors(&errors);
        std::process::exit(1);
      }
    }
    return;
  }

  let start = Instant::now();
  match bundler.build(true) {
    Ok(output) => {
      if !args.behavior.silent {
        // Print warnings
        for warning in output.warnings {
          println!("{} {warning}", Colour::Yellow.paint("Warning:"));
        }

        // Print output assets
        if !output.assets.is_empty() {
          print_output_assets(&bundler.options().dir, output.assets);
        }
      }

      let elapsed = format!("{:.2} ms", start.elapsed().as_secs_f64() * 1000.0);
      println!("\n{} Finished in {}", Colour::Green.paint("✔"), Colour::White.bold().paint(elapsed))
    }
    Err(errors) => {
      print_errors(&errors);
      std::process::exit(1);
    }
  }
}
