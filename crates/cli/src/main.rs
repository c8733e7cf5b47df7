use anyhow::Result;
use cesgraph::ces::{
    build_ces, decompose_ces_by_color, filter_by_overlap, restrict_to_context, Ces, CesCfg,
    ContextMode,
};
use cesgraph::synth::{generate, SynthParams};
use clap::{Args, Parser, Subcommand, ValueEnum};
use serde_json::json;
use std::path::PathBuf;
use tracing_subscriber::fmt::SubscriberBuilder;

mod input;
mod provenance;

use input::{write_json, InputDoc};
use provenance::Sidecar;

#[derive(Parser)]
#[command(name = "cesgraph-cli")]
#[command(about = "Layered CES graphs from precomputed distinctions and relations")]
struct Cmd {
    #[command(subcommand)]
    action: Action,
}

#[derive(Subcommand)]
enum Action {
    /// Build the 4/3/2-face layers and write them as JSON
    Build {
        #[arg(long)]
        input: PathBuf,
        #[arg(long)]
        out: PathBuf,
        #[command(flatten)]
        opts: LayerOpts,
    },
    /// Build, then split every layer by edge color
    Decompose {
        #[arg(long)]
        input: PathBuf,
        #[arg(long)]
        out: PathBuf,
        #[command(flatten)]
        opts: LayerOpts,
    },
    /// Write a seeded synthetic input document
    Synth {
        #[arg(long, default_value_t = 4)]
        nodes: usize,
        #[arg(long, default_value_t = 8)]
        distinctions: usize,
        #[arg(long, default_value_t = 0.5)]
        density: f64,
        #[arg(long, default_value_t = 0.5)]
        face_keep: f64,
        #[arg(long, default_value_t = 0)]
        seed: u64,
        #[arg(long)]
        out: PathBuf,
    },
    /// Print a small provenance JSON block
    Report,
}

#[derive(Args, Clone, Debug, Default)]
struct LayerOpts {
    /// Point 3-face arrows at the base mechanism
    #[arg(long)]
    invert_3face: bool,
    /// Drop lower-degree edges covered by higher-degree purviews
    #[arg(long)]
    filter_overlap: bool,
    /// Comma-separated node labels; keep only edges touching them
    #[arg(long, value_delimiter = ',')]
    context: Vec<String>,
    #[arg(long, value_enum, default_value_t = Mode::Any)]
    mode: Mode,
}

#[derive(ValueEnum, Clone, Copy, Debug, Default)]
enum Mode {
    All,
    #[default]
    Any,
}

impl From<Mode> for ContextMode {
    fn from(m: Mode) -> Self {
        match m {
            Mode::All => ContextMode::All,
            Mode::Any => ContextMode::Any,
        }
    }
}

impl LayerOpts {
    fn params(&self) -> serde_json::Value {
        json!({
            "invert_3face": self.invert_3face,
            "filter_overlap": self.filter_overlap,
            "context": self.context,
            "mode": format!("{:?}", self.mode).to_lowercase(),
        })
    }
}

fn main() -> Result<()> {
    SubscriberBuilder::default().with_target(false).init();
    let cmd = Cmd::parse();
    match cmd.action {
        Action::Build { input, out, opts } => build(input, out, opts),
        Action::Decompose { input, out, opts } => decompose(input, out, opts),
        Action::Synth {
            nodes,
            distinctions,
            density,
            face_keep,
            seed,
            out,
        } => synth(
            SynthParams {
                n_nodes: nodes,
                n_distinctions: distinctions,
                relation_density: density,
                face_keep,
            },
            seed,
            out,
        ),
        Action::Report => report(),
    }
}

/// Build, then optionally prune and restrict, in that order.
fn layered(doc: &InputDoc, opts: &LayerOpts) -> Result<Ces> {
    let cfg = CesCfg {
        invert_3face_convention: opts.invert_3face,
    };
    let mut ces = build_ces(&doc.labels, &doc.distinctions, &doc.relations, cfg)?;
    if opts.filter_overlap {
        ces = filter_by_overlap(&ces)?;
    }
    if !opts.context.is_empty() {
        ces = restrict_to_context(&ces, &opts.context, opts.mode.into());
    }
    Ok(ces)
}

fn build(input: PathBuf, out: PathBuf, opts: LayerOpts) -> Result<()> {
    let doc = InputDoc::read(&input)?;
    let ces = layered(&doc, &opts)?;
    tracing::info!(
        input = %input.display(),
        out = %out.display(),
        face4 = ces.face4.edge_count(),
        face3 = ces.face3.edge_count(),
        face2 = ces.face2.edge_count(),
        "build"
    );
    write_json(&out, &ces)?;
    provenance::write_sidecar(&out, Sidecar::new(opts.params()).with_input(&input))?;
    Ok(())
}

fn decompose(input: PathBuf, out: PathBuf, opts: LayerOpts) -> Result<()> {
    let doc = InputDoc::read(&input)?;
    let parts = decompose_ces_by_color(&layered(&doc, &opts)?);
    tracing::info!(input = %input.display(), out = %out.display(), "decompose");
    write_json(&out, &parts)?;
    provenance::write_sidecar(&out, Sidecar::new(opts.params()).with_input(&input))?;
    Ok(())
}

fn synth(params: SynthParams, seed: u64, out: PathBuf) -> Result<()> {
    let sample = generate(&params, seed)?;
    tracing::info!(
        seed,
        distinctions = sample.distinctions.len(),
        relations = sample.relations.len(),
        out = %out.display(),
        "synth"
    );
    let sidecar = Sidecar::new(json!({
        "nodes": params.n_nodes,
        "distinctions": params.n_distinctions,
        "density": params.relation_density,
        "face_keep": params.face_keep,
        "seed": seed,
    }));
    write_json(&out, &InputDoc::from(sample))?;
    provenance::write_sidecar(&out, sidecar)?;
    Ok(())
}

fn report() -> Result<()> {
    let obj = provenance::summary(json!({}));
    println!("{}", serde_json::to_string_pretty(&obj)?);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use cesgraph::ces::LayerGraph;
    use tempfile::tempdir;

    fn sample_doc() -> InputDoc {
        InputDoc::from(
            generate(
                &SynthParams {
                    n_nodes: 4,
                    n_distinctions: 10,
                    relation_density: 0.9,
                    face_keep: 0.7,
                },
                21,
            )
            .unwrap(),
        )
    }

    #[test]
    fn layered_options_compose() {
        let doc = sample_doc();
        let plain = layered(&doc, &LayerOpts::default()).unwrap();
        let pruned = layered(
            &doc,
            &LayerOpts {
                filter_overlap: true,
                ..LayerOpts::default()
            },
        )
        .unwrap();
        assert_eq!(pruned.face4, plain.face4);
        assert!(pruned.edge_count() <= plain.edge_count());

        let label = plain.face4.nodes().next().unwrap().label.clone();
        let scoped = layered(
            &doc,
            &LayerOpts {
                context: vec![label.clone()],
                mode: Mode::Any,
                ..LayerOpts::default()
            },
        )
        .unwrap();
        for (_, g) in scoped.layers() {
            assert!(g.edges().all(|e| e.source == label || e.target == label));
        }
    }

    #[test]
    fn build_writes_layers_and_sidecar() {
        let dir = tempdir().unwrap();
        let input = dir.path().join("in.json");
        let out = dir.path().join("out/ces.json");
        write_json(&input, &sample_doc()).unwrap();
        build(input, out.clone(), LayerOpts::default()).unwrap();
        let parsed: serde_json::Value =
            serde_json::from_slice(&std::fs::read(&out).unwrap()).unwrap();
        assert_eq!(parsed["4"]["kind"], "undirected");
        assert_eq!(parsed["3"]["kind"], "multi_directed");
        assert_eq!(parsed["2"]["nodes"].as_array().unwrap().len(), 10);
        assert!(dir.path().join("out/ces.provenance.json").exists());
    }

    #[test]
    fn built_layers_read_back_unchanged() {
        let dir = tempdir().unwrap();
        let input = dir.path().join("in.json");
        let out = dir.path().join("ces.json");
        let doc = sample_doc();
        write_json(&input, &doc).unwrap();
        let opts = LayerOpts {
            filter_overlap: true,
            ..LayerOpts::default()
        };
        build(input, out.clone(), opts.clone()).unwrap();
        let back: Ces = serde_json::from_slice(&std::fs::read(&out).unwrap()).unwrap();
        assert_eq!(back, layered(&doc, &opts).unwrap());
        assert!(back.face3.is_directed() && !back.face4.is_directed());
    }

    #[test]
    fn layer_json_is_checked_on_read() {
        let dangling = r#"{"kind": "multi_directed",
            "nodes": [{"label": "A", "mechanism": [0], "phi": 0.5}],
            "edges": [{"source": "A", "target": "B", "color": "cause", "purview": [0]}]}"#;
        assert!(serde_json::from_str::<LayerGraph>(dangling).is_err());

        let repeated = r#"{"kind": "undirected",
            "nodes": [
                {"label": "A", "mechanism": [0], "phi": 0.5},
                {"label": "A", "mechanism": [1], "phi": 0.2}
            ],
            "edges": []}"#;
        assert!(serde_json::from_str::<LayerGraph>(repeated).is_err());
    }

    #[test]
    fn decompose_writes_every_expected_color() {
        let dir = tempdir().unwrap();
        let input = dir.path().join("in.json");
        let out = dir.path().join("parts.json");
        write_json(&input, &sample_doc()).unwrap();
        decompose(input, out.clone(), LayerOpts::default()).unwrap();
        let parsed: serde_json::Value =
            serde_json::from_slice(&std::fs::read(&out).unwrap()).unwrap();
        assert!(parsed["2"]["mixed"].is_object());
        assert!(parsed["3"]["cause"].is_object());
        assert!(parsed["4"]["dominant"].is_object());
    }
}
