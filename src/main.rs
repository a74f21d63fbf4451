use anyhow::{bail, Context, Result};
use clap::Parser;
use cu_analyzer::analyzer::{self, AnalysisRun, DocumentReport};
use cu_analyzer::cli::{Cli, Commands, KeywordAction, ScoringArgs};
use cu_analyzer::config::{Config, ScoringOverrides};
use cu_analyzer::error::CuAnalyzerError;
use cu_analyzer::store::{KeywordStore, ListFilter};
use cu_analyzer::{export, scanner};
use cu_analyzer_common::{Field, Taxonomy};
use dialoguer::Confirm;
use std::path::{Path, PathBuf};

const REPORT_FILE_NAME: &str = "report.json";

fn init_logging(verbose: bool) {
    let level = if verbose { "debug" } else { "warn" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level)).init();
}

/// 入力がフォルダならそのフォルダ、ファイルなら親フォルダ
fn default_output_dir(input: &Path) -> PathBuf {
    if input.is_dir() {
        return input.to_path_buf();
    }
    input
        .parent()
        .filter(|p| !p.as_os_str().is_empty())
        .map(Path::to_path_buf)
        .unwrap_or_else(|| PathBuf::from("."))
}

fn print_report_line(report: &DocumentReport) {
    let s = &report.summary;
    println!(
        "  {}: {} CU, GT {:.1}% ({}件合格) / IR4.0 {:.1}% ({}件合格) → {}",
        report.source, s.total_units, s.green_percent, s.green_pass, s.ir_percent, s.ir_pass, s.category
    );
}

/// Scan, build matchers and score (steps 1 and 2 of analyze/run)
fn analyze_inputs(input: &Path, recursive: bool, scoring: &ScoringArgs, steps: usize) -> Result<AnalysisRun> {
    let config = scoring
        .overrides()
        .apply(&Config::load().context("設定の読み込みに失敗しました")?)?;

    println!("[1/{}] ドキュメントをスキャン中...", steps);
    let paths = scanner::collect_inputs(input, recursive)?;
    println!("✔ {}件のドキュメントを検出\n", paths.len());

    println!("[2/{}] スコアリング中... ({}, {})", steps, config.scoring_settings().policy.describe(), config.engine);
    let session = analyzer::build_session(&config)?;
    let run = analyzer::analyze_files(&paths, &config, &session, paths.len() > 1);

    for report in &run.reports {
        print_report_line(report);
    }
    for (path, e) in &run.failures {
        println!("✘ {}: {}", path.display(), e);
    }
    if run.reports.is_empty() {
        bail!("解析できたドキュメントがありません");
    }
    println!("✔ {}件を解析\n", run.reports.len());
    Ok(run)
}

fn confirm(prompt: &str, yes: bool) -> Result<bool> {
    if yes {
        return Ok(true);
    }
    Ok(Confirm::new().with_prompt(prompt).default(false).interact()?)
}

fn print_columns(items: &[String]) {
    for chunk in items.chunks(5) {
        let row: Vec<String> = chunk.iter().map(|s| format!("{:<28}", s)).collect();
        println!("  {}", row.join("").trim_end());
    }
}

fn run_keywords(taxonomy: Taxonomy, action: KeywordAction) -> Result<()> {
    let config = Config::load()?;
    let mut store = KeywordStore::open(&config.store_dir(), taxonomy);

    match action {
        KeywordAction::List { filter } => {
            let filter: ListFilter = filter.parse().map_err(CuAnalyzerError::KeywordStore)?;
            let listing = store.list(filter);

            println!("{} ({})", taxonomy, store.path().display());
            println!("既定のベースキーワード: {}", listing.default_total);
            print_columns(&listing.defaults);
            println!("\n追加したベースキーワード: {}", listing.custom_total);
            if listing.custom.is_empty() {
                println!("  (該当なし)");
            } else {
                print_columns(&listing.custom);
            }
        }

        KeywordAction::Add { label, variants } => {
            store.add(&label, &variants)?;
            println!("✔ 追加しました: {}", label.trim());
        }

        KeywordAction::Edit { label, rename, variants } => {
            if rename.is_none() && variants.is_none() {
                bail!("--rename または --variants を指定してください");
            }
            store.edit(&label, rename.as_deref(), variants.as_deref())?;
            println!("✔ 保存しました");
        }

        KeywordAction::Delete { label, yes } => {
            let prompt = format!("「{}」とそのバリアントをすべて削除しますか?", label);
            if !confirm(&prompt, yes)? {
                println!("キャンセルしました");
                return Ok(());
            }
            let removed = store.delete(&label)?;
            println!("✔ 削除しました: {}", removed);
        }

        KeywordAction::DeleteVariants { label, variants } => {
            let removed = store.delete_variants(&label, &variants)?;
            if removed == 0 {
                println!("一致するバリアントがありません");
            } else {
                println!("✔ {}件のバリアントを削除しました", removed);
            }
        }

        KeywordAction::Clear { yes } => {
            let prompt = format!("{}を削除しますか?", store.path().display());
            if !confirm(&prompt, yes)? {
                println!("キャンセルしました");
                return Ok(());
            }
            store.clear()?;
            println!("✔ 保存ファイルを削除しました");
        }
    }

    Ok(())
}

fn to_u32(value: i64, what: &str) -> Result<u32> {
    u32::try_from(value).map_err(|_| CuAnalyzerError::Config(format!("{}: {}", what, value)).into())
}

fn to_i32(value: i64, what: &str) -> Result<i32> {
    i32::try_from(value).map_err(|_| CuAnalyzerError::Config(format!("{}: {}", what, value)).into())
}

fn show_config(config: &Config) {
    println!("設定:");
    for field in Field::ALL {
        println!(
            "  {:<22} 重み {:>3}  閾値 {:>3}",
            field.to_string(),
            config.weights.get(field),
            config.thresholds.get(field)
        );
    }
    println!("  ポリシー: {}", config.policy.describe());
    println!("  CU合格閾値: {}%", config.pass_threshold);
    println!("  文書シェア閾値: {}%", config.share_threshold);
    println!("  照合エンジン: {}", config.engine);
    println!("  キーワード保存先: {}", config.store_dir().display());
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    match cli.command {
        Commands::Analyze { input, output, recursive, scoring } => {
            println!("🌱 cu-analyzer - 解析\n");

            let run = analyze_inputs(&input, recursive, &scoring, 3)?;

            println!("[3/3] 結果を保存中...");
            let output = output.unwrap_or_else(|| default_output_dir(&input).join(REPORT_FILE_NAME));
            analyzer::save_reports(&run.reports, &output)
                .with_context(|| format!("保存に失敗しました: {}", output.display()))?;
            println!("✔ 結果を保存: {}", output.display());

            println!("\n✅ 解析完了");
        }

        Commands::Export { input, format, output } => {
            println!("📄 cu-analyzer - エクスポート\n");

            let reports = analyzer::load_reports(&input)
                .with_context(|| format!("レポートを読み込めません: {}", input.display()))?;
            let output_dir = output.unwrap_or_else(|| default_output_dir(&input));
            export::export_reports(&reports, format, &output_dir)?;

            println!("\n✅ エクスポート完了");
        }

        Commands::Run { input, output, format, recursive, scoring } => {
            println!("🚀 cu-analyzer - 一括処理\n");

            let run = analyze_inputs(&input, recursive, &scoring, 3)?;

            println!("[3/3] エクスポート中...");
            let output_dir = output.unwrap_or_else(|| default_output_dir(&input));
            std::fs::create_dir_all(&output_dir)?;
            let report_path = output_dir.join(REPORT_FILE_NAME);
            analyzer::save_reports(&run.reports, &report_path)?;
            println!("✔ 結果を保存: {}", report_path.display());
            export::export_reports(&run.reports, format, &output_dir)?;

            println!("\n✅ 完了");
        }

        Commands::Keywords { taxonomy, action } => {
            run_keywords(taxonomy, action)?;
        }

        Commands::Config {
            show,
            set_weight,
            set_threshold,
            count_mode,
            require_verbs,
            verb_fields,
            pass_threshold,
            engine,
            reset,
        } => {
            let mut config = Config::load()?;
            let mut changed = false;

            if reset {
                config.reset();
                changed = true;
                println!("✔ 既定値に戻しました");
            }

            for (field, weight) in set_weight {
                config.set_weight(field, to_u32(weight, "重みが範囲外です")?)?;
                changed = true;
                println!("✔ {} の重みを {} に設定しました", field, weight);
            }

            for (field, threshold) in set_threshold {
                config.set_threshold(field, to_i32(threshold, "閾値が範囲外です")?)?;
                changed = true;
                println!("✔ {} の閾値を {} に設定しました", field, threshold);
            }

            let overrides = ScoringOverrides {
                count_mode,
                require_verbs,
                verb_fields,
                pass_threshold,
                engine,
            };
            if overrides != ScoringOverrides::default() {
                config = overrides.apply(&config)?;
                changed = true;
                println!("✔ ポリシー: {}", config.policy.describe());
            }

            if changed {
                config.save()?;
                println!("✔ 設定を保存しました: {}", Config::config_path()?.display());
            }

            if show || !changed {
                show_config(&config);
            }
        }
    }

    Ok(())
}
