// Copyright 2025. Pixel-perfect comparison CLI.
//
// Usage:
//   pixel-compare render <scene> [-o output.bmp]
//   pixel-compare compare <a.bmp> <b.bmp> [-d diff.bmp] [-s sidebyside.bmp]
//   pixel-compare verify <scene> --reference <renderer_exe> [-d diff.bmp] [--flip-y]
//   pixel-compare list

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use pixel_compare::render::{available_scenes, load_scene, render_scene, scene_label};
use pixel_compare::{
    compare_surfaces, generate_diff_image, generate_sidebyside, load_image, save_image,
    CompareResult,
};
use std::path::PathBuf;
use std::process::{self, Command};

#[derive(Parser)]
#[command(name = "pixel-compare", version, about = "Pixel-perfect comparison for sw-renderer")]
struct Cli {
    #[command(subcommand)]
    command: Cmd,
}

#[derive(Subcommand)]
enum Cmd {
    /// Render a built-in scene or a scene JSON file.
    Render {
        scene: String,
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
    /// Compare two image files (.bmp, .raw).
    Compare {
        a: PathBuf,
        b: PathBuf,
        #[arg(short, long)]
        diff: Option<PathBuf>,
        #[arg(short, long)]
        sidebyside: Option<PathBuf>,
    },
    /// Render a scene here and with a reference renderer, then compare.
    Verify {
        scene: String,
        /// Executable invoked as `<exe> <scene.json> <width> <height> <out.raw>`.
        #[arg(long)]
        reference: PathBuf,
        #[arg(short, long)]
        diff: Option<PathBuf>,
        /// The reference writes bottom-up rows.
        #[arg(long)]
        flip_y: bool,
    },
    /// List built-in scenes.
    List,
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();
    let identical = match run(cli.command) {
        Ok(identical) => identical,
        Err(e) => {
            eprintln!("error: {e:#}");
            process::exit(2);
        }
    };
    if !identical {
        process::exit(1);
    }
}

/// Returns false when a comparison found differences.
fn run(cmd: Cmd) -> Result<bool> {
    match cmd {
        Cmd::List => {
            println!("Available scenes:");
            for name in available_scenes() {
                println!("  {name}");
            }
            Ok(true)
        }
        Cmd::Render { scene, output } => {
            cmd_render(&scene, output)?;
            Ok(true)
        }
        Cmd::Compare {
            a,
            b,
            diff,
            sidebyside,
        } => cmd_compare(a, b, diff, sidebyside),
        Cmd::Verify {
            scene,
            reference,
            diff,
            flip_y,
        } => cmd_verify(&scene, reference, diff, flip_y),
    }
}

fn cmd_render(scene: &str, output: Option<PathBuf>) -> Result<()> {
    let s = load_scene(scene)?;
    let surface = render_scene(&s)?;
    let out = output
        .unwrap_or_else(|| PathBuf::from(format!("{}_{}x{}.bmp", scene_label(scene), s.width, s.height)));
    save_image(&out, &surface)?;
    println!("Rendered '{}' ({}x{}) -> {}", scene, s.width, s.height, out.display());
    Ok(())
}

fn cmd_compare(
    a: PathBuf,
    b: PathBuf,
    diff: Option<PathBuf>,
    sidebyside: Option<PathBuf>,
) -> Result<bool> {
    let buf_a = load_image(&a)?;
    let buf_b = load_image(&b)?;
    let result = compare_surfaces(&buf_a, &buf_b)?;
    println!("{result}");

    if let Some(dp) = diff {
        save_image(&dp, &generate_diff_image(&buf_a, &buf_b)?)?;
        println!("Diff saved: {}", dp.display());
    }
    if let Some(sp) = sidebyside {
        save_image(&sp, &generate_sidebyside(&buf_a, &buf_b)?)?;
        println!("Side-by-side saved: {}", sp.display());
    }
    Ok(result.identical)
}

fn cmd_verify(scene: &str, reference: PathBuf, diff: Option<PathBuf>, flip_y: bool) -> Result<bool> {
    let s = load_scene(scene)?;
    let label = scene_label(scene);
    let (w, h) = (s.width, s.height);

    // 1. Render here
    log::info!("rendering '{scene}' with sw-renderer");
    let ours = render_scene(&s)?;
    let ours_path = PathBuf::from(format!("{label}_sw_{w}x{h}.bmp"));
    save_image(&ours_path, &ours)?;
    println!("  Saved sw-renderer output: {}", ours_path.display());

    // 2. Run the reference renderer on the same scene
    let json_path = PathBuf::from(format!("{label}_{w}x{h}.json"));
    std::fs::write(&json_path, s.to_json()?)
        .with_context(|| format!("writing {}", json_path.display()))?;
    let ref_raw_path = PathBuf::from(format!("{label}_ref_{w}x{h}.raw"));

    log::info!("running reference renderer {}", reference.display());
    let status = Command::new(&reference)
        .arg(&json_path)
        .arg(w.to_string())
        .arg(h.to_string())
        .arg(&ref_raw_path)
        .status()
        .with_context(|| format!("running {}", reference.display()))?;
    if !status.success() {
        bail!("reference renderer failed with exit code {:?}", status.code());
    }

    let mut theirs = load_image(&ref_raw_path)?;
    if flip_y {
        theirs.flip_vertical();
    }
    let ref_bmp_path = PathBuf::from(format!("{label}_ref_{w}x{h}.bmp"));
    save_image(&ref_bmp_path, &theirs)?;
    println!("  Saved reference output: {}", ref_bmp_path.display());

    // 3. Compare
    let result = compare_surfaces(&ours, &theirs)?;
    println!("\n{result}");

    if let Some(dp) = diff {
        save_image(&dp, &generate_diff_image(&ours, &theirs)?)?;
        println!("Diff saved: {}", dp.display());
    }

    if !result.identical {
        let sbs_path = PathBuf::from(format!("{label}_sidebyside_{w}x{h}.bmp"));
        save_image(&sbs_path, &generate_sidebyside(&ours, &theirs)?)?;
        println!("Side-by-side saved: {}", sbs_path.display());
        print_histogram(&result);
        return Ok(false);
    }

    println!("\nPIXEL-PERFECT MATCH!");
    Ok(true)
}

fn print_histogram(result: &CompareResult) {
    println!("\nDifference histogram:");
    for (diff_val, &count) in result.diff_histogram.iter().enumerate() {
        if count > 0 {
            println!("  diff={diff_val}: {count} channels");
        }
    }
}
