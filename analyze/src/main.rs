use anyhow::Context;
use clap::Parser;
use itertools::Itertools;
use log::info;
use maxquant::{subset_vocabulary, LoadOptions, PeptideTable};
use parsimony::{project_all, Config, Decomposition, Evidence, Peptide, Subset};
use std::fs;
use std::io::{self, prelude::*};
use std::path::{Path, PathBuf};

/// Parsimony protein-group inference over MaxQuant peptide evidence
#[derive(Parser)]
struct Args {
    /// Path to a MaxQuant peptides.txt
    peptides: PathBuf,

    /// JSON file of analysis parameters; missing fields take their defaults
    #[arg(long)]
    params: Option<PathBuf>,

    /// Where to write the per-decomposition protein groups
    #[arg(long, default_value = "protein_groups.tsv")]
    output: PathBuf,

    /// Where to write the per-subset summary counts
    #[arg(long, default_value = "subset_summary.tsv")]
    summary: PathBuf,

    /// Skip peptides without an MS/MS spectrum match
    #[arg(long)]
    exclude_nomsms: bool,

    /// Skip reverse-database and contaminant peptides
    #[arg(long)]
    exclude_special: bool,
}

fn load_config(path: Option<&Path>) -> anyhow::Result<Config> {
    match path {
        Some(path) => {
            let text = fs::read_to_string(path)
                .with_context(|| format!("failed to read {}", path.display()))?;
            serde_json::from_str(&text)
                .with_context(|| format!("invalid parameters in {}", path.display()))
        }
        None => Ok(Config::default()),
    }
}

fn write_groups<P: AsRef<Path>>(path: P, decompositions: &[&Decomposition]) -> io::Result<()> {
    let mut f = fs::File::create(path)?;
    writeln!(f, "decomposition\tlabels\tpeptide_ids")?;
    for dec in decompositions {
        for group in &dec.groups {
            writeln!(
                f,
                "{}\t{}\t{}",
                dec.tag,
                group.labels.iter().join(";"),
                group
                    .peptide_ids
                    .iter()
                    .copied()
                    .sorted()
                    .map(|id| id.to_string())
                    .join(";")
            )?;
        }
    }
    Ok(())
}

fn write_summary<P: AsRef<Path>>(path: P, decompositions: &[&Decomposition]) -> io::Result<()> {
    let mut f = fs::File::create(path)?;
    writeln!(f, "Subset\tPeptides\tProtein Groups")?;
    for dec in decompositions {
        writeln!(
            f,
            "{}\t{}\t{}",
            dec.tag,
            dec.covered_ids().len(),
            dec.group_count()
        )?;
    }
    Ok(())
}

fn main() -> anyhow::Result<()> {
    env_logger::init();
    let args = Args::parse();

    let config = load_config(args.params.as_deref())?;
    let opts = LoadOptions {
        exclude_nomsms: args.exclude_nomsms,
        exclude_special: args.exclude_special,
    };

    let table = PeptideTable::load(&args.peptides, opts)
        .with_context(|| format!("failed to load {}", args.peptides.display()))?;
    info!(
        "{} usable peptide records across {} experiments",
        table.records.len(),
        table.experiments.len()
    );

    let mut evidence = Evidence::default();
    for record in &table.records {
        evidence.add(
            Peptide::new(record.id, record.score, record.experiments.clone()),
            &record.isoforms,
        );
    }

    let overall = evidence.decompose()?;

    let names = subset_vocabulary(&table.experiments);
    let subsets = names
        .iter()
        .map(|name| Subset::parse(name))
        .collect::<Result<Vec<_>, _>>()?;
    let views = project_all(&evidence, &overall, &subsets, &config)?;

    // subset views first, the overall decomposition as the closing row
    let mut decompositions = views.iter().collect::<Vec<_>>();
    decompositions.push(&overall);

    write_groups(&args.output, &decompositions)
        .with_context(|| format!("failed to write {}", args.output.display()))?;
    write_summary(&args.summary, &decompositions)
        .with_context(|| format!("failed to write {}", args.summary.display()))?;

    println!(
        "{} protein groups overall, {} subset views; wrote {} and {}",
        overall.group_count(),
        views.len(),
        args.output.display(),
        args.summary.display()
    );
    Ok(())
}
