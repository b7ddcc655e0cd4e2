use anyhow::Result;
use clap::Parser;
use tracing_subscriber::EnvFilter;

use kira_moha::cli::{Cli, Commands, build_config};
use kira_moha::ctx::{Ctx, InputPaths, OutputPaths, Task, derived_path};
use kira_moha::io;
use kira_moha::pipeline::Pipeline;
use kira_moha::pipeline::stage0_scaffold::Stage0Scaffold;
use kira_moha::pipeline::stage1_study::Stage1Study;
use kira_moha::pipeline::stage2_thresholds::Stage2Thresholds;
use kira_moha::pipeline::stage3_cell_states::Stage3CellStates;
use kira_moha::pipeline::stage4_cell_table::Stage4CellTable;
use kira_moha::pipeline::stage5_contexts::Stage5Contexts;
use kira_moha::pipeline::stage6_metrics::Stage6Metrics;
use kira_moha::pipeline::stage7_output::Stage7Output;

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();
    let version = env!("CARGO_PKG_VERSION");

    let ctx = match cli.command {
        Commands::Thresholds(args) => {
            let mut config = build_config(&args.model, &args.columns);
            config.biomarker_col_tag = args.biomarker_tag;
            let out = args
                .out
                .unwrap_or_else(|| derived_path(&args.input, "thresholds.txt"));
            let mut ctx = Ctx::new(
                Task::Thresholds,
                config,
                InputPaths {
                    measures: Some(args.input),
                    ..InputPaths::default()
                },
                OutputPaths {
                    thresholds: Some(out),
                    ..OutputPaths::default()
                },
                false,
                version,
            );
            let pipeline = Pipeline::new(vec![
                Box::new(Stage0Scaffold::new()),
                Box::new(Stage1Study::new()),
                Box::new(Stage2Thresholds::new()),
            ]);
            pipeline.run(&mut ctx)?;
            ctx
        }
        Commands::CellStates(args) => {
            let mut config = build_config(&args.model, &args.columns);
            config.default_cell_area = args.default_cell_area;
            let thresholds = args
                .thresholds
                .unwrap_or_else(|| derived_path(&args.input, "thresholds.txt"));
            let cms = args
                .cms
                .unwrap_or_else(|| derived_path(&args.input, "MarkerStates.txt"));
            let mi = args
                .mi
                .unwrap_or_else(|| derived_path(&args.input, "MarkerIndex.txt"));
            let mut ctx = Ctx::new(
                Task::CellStates,
                config,
                InputPaths {
                    measures: Some(args.input),
                    thresholds: Some(thresholds),
                    ..InputPaths::default()
                },
                OutputPaths {
                    cell_states: Some(cms),
                    marker_index: Some(mi),
                    ..OutputPaths::default()
                },
                false,
                version,
            );
            let pipeline = Pipeline::new(vec![
                Box::new(Stage0Scaffold::new()),
                Box::new(Stage1Study::new()),
                Box::new(Stage2Thresholds::new()),
                Box::new(Stage3CellStates::new()),
            ]);
            pipeline.run(&mut ctx)?;
            ctx
        }
        Commands::Heterogeneity(args) => {
            let mut config = build_config(&args.model, &args.columns);
            config.critical_distance_factor = args.metrics.critical_distance_factor;
            config.max_num_cell_states = args.metrics.max_num_cell_states;
            let mut ctx = Ctx::new(
                Task::Heterogeneity,
                config,
                InputPaths {
                    cell_states: Some(args.input),
                    ..InputPaths::default()
                },
                OutputPaths {
                    report: Some(args.metrics.report_path()),
                    json: args.metrics.json.clone(),
                    ..OutputPaths::default()
                },
                args.metrics.append,
                version,
            );
            ctx.sample_id = args.sample_id;
            ctx.context_name = args.context;
            let pipeline = Pipeline::new(vec![
                Box::new(Stage0Scaffold::new()),
                Box::new(Stage4CellTable::new()),
                Box::new(Stage5Contexts::new()),
                Box::new(Stage6Metrics::new()),
                Box::new(Stage7Output::new()),
            ]);
            pipeline.run(&mut ctx)?;
            ctx
        }
        Commands::GenesetHeterogeneity(args) => {
            let mut config = build_config(&args.model, &args.columns);
            config.critical_distance_factor = args.metrics.critical_distance_factor;
            config.max_num_cell_states = args.metrics.max_num_cell_states;
            let mut ctx = Ctx::new(
                Task::GenesetHeterogeneity,
                config,
                InputPaths {
                    cell_states: Some(args.cms),
                    marker_index: Some(args.mi),
                    genesets: Some(args.genesets),
                    ..InputPaths::default()
                },
                OutputPaths {
                    report: Some(args.metrics.report_path()),
                    json: args.metrics.json.clone(),
                    ..OutputPaths::default()
                },
                args.metrics.append,
                version,
            );
            let pipeline = Pipeline::new(vec![
                Box::new(Stage0Scaffold::new()),
                Box::new(Stage4CellTable::new()),
                Box::new(Stage5Contexts::new()),
                Box::new(Stage6Metrics::new()),
                Box::new(Stage7Output::new()),
            ]);
            pipeline.run(&mut ctx)?;
            ctx
        }
    };

    print_summary(&ctx);
    Ok(())
}

fn print_summary(ctx: &Ctx) {
    print!("{}", io::summary::format_summary(ctx));
    if !ctx.warnings.is_empty() {
        println!("warnings:");
        for warning in &ctx.warnings {
            println!("- {}", warning);
        }
    }
}
