//! 形態素解析を実行するユーティリティ
//!
//! このバイナリは、標準入力から読み込んだテキストを形態素解析し、
//! 指定された出力形式（mecab、wakati、detail）で結果を出力します。

use std::error::Error;
use std::io::{BufRead, BufWriter, Write};
use std::path::PathBuf;
use std::str::FromStr;
use std::time::Instant;

use mecab_ko::token::TokenBuf;
use mecab_ko::{Dictionary, Tokenizer};

use clap::Parser;

/// 出力モード
#[derive(Clone, Debug)]
enum OutputMode {
    Mecab,
    Wakati,
    Detail,
}

impl FromStr for OutputMode {
    type Err = &'static str;

    fn from_str(mode: &str) -> Result<Self, Self::Err> {
        match mode {
            "mecab" => Ok(Self::Mecab),
            "wakati" => Ok(Self::Wakati),
            "detail" => Ok(Self::Detail),
            _ => Err("Could not parse a mode"),
        }
    }
}

/// コマンドライン引数
#[derive(Parser, Debug)]
#[clap(name = "tokenize", about = "Predicts Korean morphemes")]
struct Args {
    /// Directory containing the binary dictionary (tid.dat, cc.dat, unk*.dat, optionally gzipped).
    #[clap(short = 'd', long)]
    dicdir: PathBuf,

    /// Output mode. Choices are mecab, wakati, and detail.
    #[clap(short = 'O', long, default_value = "mecab")]
    output_mode: OutputMode,

    /// Maximum length of grouped unknown words. 0 means unlimited.
    #[clap(short = 'M', long)]
    max_grouping_len: Option<usize>,
}

/// 素性文字列から先頭の表層形を除いた部分を返します。
fn feature_body(token: &TokenBuf) -> &str {
    token
        .feature
        .split_once(',')
        .map_or("", |(_, rest)| rest)
}

fn main() -> Result<(), Box<dyn Error>> {
    env_logger::init();
    let args = Args::parse();

    eprintln!("Loading the dictionary...");
    let start = Instant::now();
    let dict = Dictionary::from_dir(&args.dicdir)?;
    log::info!(
        "Loaded the dictionary from {} in {:.3} seconds",
        args.dicdir.display(),
        start.elapsed().as_secs_f64()
    );

    let tokenizer = Tokenizer::new(dict).max_grouping_len(args.max_grouping_len.unwrap_or(0));

    eprintln!("Ready to tokenize");

    let is_tty = atty::is(atty::Stream::Stdout);

    let out = std::io::stdout();
    let mut out = BufWriter::new(out.lock());
    let lines = std::io::stdin().lock().lines();
    for line in lines {
        let line = line?;
        let tokens = tokenizer.tokenize(&line)?;
        match args.output_mode {
            OutputMode::Mecab => {
                for t in &tokens {
                    out.write_all(t.surface.as_bytes())?;
                    out.write_all(b"\t")?;
                    out.write_all(feature_body(t).as_bytes())?;
                    out.write_all(b"\n")?;
                }
                out.write_all(b"EOS\n")?;
            }
            OutputMode::Wakati => {
                for (i, t) in tokens.iter().enumerate() {
                    if i != 0 {
                        out.write_all(b" ")?;
                    }
                    out.write_all(t.surface.as_bytes())?;
                }
                out.write_all(b"\n")?;
            }
            OutputMode::Detail => {
                for t in &tokens {
                    writeln!(
                        &mut out,
                        "{}\t{}\trange={}..{}\tpos={}\tlex_type={:?}\tleft_id={}\tright_id={}\tword_cost={}\ttotal_cost={}",
                        t.surface,
                        feature_body(t),
                        t.range_char.start,
                        t.range_char.end,
                        t.pos().join("+"),
                        t.lex_type,
                        t.left_id,
                        t.right_id,
                        t.word_cost,
                        t.total_cost,
                    )?;
                }
                out.write_all(b"EOS\n")?;
            }
        }
        if is_tty {
            out.flush()?;
        }
    }

    Ok(())
}
