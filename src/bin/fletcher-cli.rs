use clap::{Parser, Subcommand};
use std::io;
use std::path::PathBuf;
use std::process::ExitCode;

use fletcher_rust::fletcher_common_rs::packet::core::{
    parse_bits, verify, ChecksumWidth, FletcherChecksum, FletcherError, FletcherResult, Message,
};
use fletcher_rust::fletcher_common_rs::session::ReceptorSession;
use fletcher_rust::fletcher_common_rs::utils::{init_logging, ConfigLoader, FletcherConfig};

#[derive(Parser)]
#[command(name = "fletcher")]
#[command(about = "Fletcher's Checksum - ビットメッセージ検証ツール")]
#[command(version = "0.1.0")]
#[command(long_about = "
Fletcher's Checksum 検証ツール

このツールは以下の機能を提供します：
- interactive: 対話メニューで受信メッセージを検証（既定）
- verify:      末尾にチェックサムを含むメッセージを検証
- compute:     ペイロードのチェックサムを計算
- encode:      ペイロードにチェックサムを付加
- config:      有効な設定を表示・保存
")]
struct Cli {
    /// チェックサム幅（ビット、偶数）
    #[arg(short, long, global = true)]
    width: Option<u32>,

    /// 設定ファイル（JSON / TOML）
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// デバッグモード
    #[arg(short, long, global = true)]
    debug: bool,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// 対話メニューを開始
    #[command(alias = "i")]
    Interactive,
    /// メッセージ（ペイロード + チェックサム）を検証
    #[command(alias = "v")]
    Verify {
        /// 2進数文字列
        message: String,
    },
    /// ペイロードのチェックサムを計算
    #[command(alias = "c")]
    Compute {
        payload: String,
    },
    /// ペイロードにチェックサムを付加したメッセージを出力
    #[command(alias = "e")]
    Encode {
        payload: String,
    },
    /// 設定情報表示
    Config {
        /// 設定をファイルに保存（拡張子 .json / .toml）
        #[arg(long)]
        write: Option<PathBuf>,
    },
}

const EXIT_DISCARDED: u8 = 1;
const EXIT_INVALID_INPUT: u8 = 2;

fn load_config(cli: &Cli) -> FletcherResult<(ConfigLoader, FletcherConfig)> {
    let loader = match &cli.config {
        Some(path) => {
            if !path.exists() {
                return Err(FletcherError::Config(format!("Config file not found: {}", path.display())));
            }
            ConfigLoader::with_paths(vec![path.clone()])
        }
        None => ConfigLoader::new(),
    };
    let mut config = loader.load()?;

    if let Some(width) = cli.width {
        config.checksum.width = width;
    }
    if cli.debug {
        config.logging.level = "debug".into();
    }
    Ok((loader, config))
}

fn run(cli: Cli) -> FletcherResult<ExitCode> {
    let (loader, config) = load_config(&cli)?;
    let width: ChecksumWidth = config.checksum_width()?;
    init_logging(&config.logging)?;

    let engine = FletcherChecksum::new(width);

    match cli.command.unwrap_or(Commands::Interactive) {
        Commands::Interactive => {
            let stdin = io::stdin();
            let mut session = ReceptorSession::new(stdin.lock(), io::stdout(), width);
            session.run()?;
        }

        Commands::Verify { message } => {
            let message = match Message::parse(&message, width) {
                Ok(message) => message,
                Err(FletcherError::Symbol(e)) => {
                    eprintln!("❌ 入力エラー: {}", e);
                    return Ok(ExitCode::from(EXIT_INVALID_INPUT));
                }
                Err(FletcherError::Width(e)) => {
                    println!("❌ {} Message discarded.", e);
                    return Ok(ExitCode::from(EXIT_DISCARDED));
                }
                Err(e) => return Err(e),
            };

            let report = verify(&message);
            println!("Computed checksum: {}, Original checksum: {}", report.computed, report.claimed);
            match report.into_result() {
                Ok(payload) => println!("✅ Message is valid. Original message: {}", payload),
                Err(e) => {
                    log::debug!("{}", e);
                    println!("❌ This message has errors. Message discarded.");
                    return Ok(ExitCode::from(EXIT_DISCARDED));
                }
            }
        }

        Commands::Compute { payload } => {
            let bits = match parse_bits(&payload) {
                Ok(bits) => bits,
                Err(e) => {
                    eprintln!("❌ 入力エラー: {}", e);
                    return Ok(ExitCode::from(EXIT_INVALID_INPUT));
                }
            };
            let word = engine.compute(&bits);
            println!("{}", word);
            log::debug!("sum1={} sum2={} value={}", word.low_half(), word.high_half(), word.value());
        }

        Commands::Encode { payload } => {
            let bits = match parse_bits(&payload) {
                Ok(bits) => bits,
                Err(e) => {
                    eprintln!("❌ 入力エラー: {}", e);
                    return Ok(ExitCode::from(EXIT_INVALID_INPUT));
                }
            };
            println!("{}", engine.encode(&bits));
        }

        Commands::Config { write } => {
            println!("=== 設定 ===");
            println!("チェックサム幅: {}ビット", width);
            println!("ログレベル: {}", config.logging.level);
            println!("ログファイル: {}", config.logging.file.as_deref().unwrap_or("(stderr)"));
            if let Some(path) = write {
                loader.save_config(&config, &path)?;
                println!("💾 保存しました: {}", path.display());
            }
        }
    }

    Ok(ExitCode::SUCCESS)
}

fn main() -> ExitCode {
    dotenvy::dotenv().ok();
    let cli = Cli::parse();

    match run(cli) {
        Ok(code) => code,
        Err(e) => {
            eprintln!("❌ {}", e);
            ExitCode::from(EXIT_INVALID_INPUT)
        }
    }
}
