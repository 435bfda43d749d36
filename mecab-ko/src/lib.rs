//! # mecab-ko
//!
//! mecab-koは、ビタビアルゴリズムに基づく韓国語形態素解析（トークン化）の実装です。
//!
//! ## 概要
//!
//! このライブラリは、mecab-ko-dic形式のバイナリ辞書を読み込み、
//! 入力テキストを形態素に分割します。辞書に登録されていない文字列は、
//! 文字カテゴリに基づく未知語として扱われます。
//!
//! ## 主な機能
//!
//! - **形態素解析**: 共通接頭辞検索とビタビアルゴリズムによるトークン化
//! - **未知語処理**: 文字カテゴリのグループ化と常時起動による未知語の生成
//! - **辞書の読み込み**: 任意のリソースローダーとgzip圧縮の透過的な展開
//! - **辞書の構築**: 単語と接続コストからのバイナリ表の書き出し
//!
//! ## 使用例
//!
//! ```
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! use mecab_ko::dictionary::character::{CharacterClass, CharacterDefinition, InvokeDefinitionMap};
//! use mecab_ko::dictionary::MatrixConnector;
//! use mecab_ko::{SystemDictionaryBuilder, Tokenizer};
//!
//! let classes = InvokeDefinitionMap::new(vec![CharacterClass::new("DEFAULT", false, true, 0)]);
//! let char_def = CharacterDefinition::from_mappings(classes, &[])?;
//!
//! let mut conn = MatrixConnector::new(2, 2)?;
//! conn.put(0, 1, 5)?;
//! conn.put(1, 1, 10)?;
//!
//! let mut builder = SystemDictionaryBuilder::new(conn, char_def);
//! builder.add_word("가", 1, 1, 100, "NNG,*,F,가,*,*,*,*")?;
//! builder.add_word("나", 1, 1, 50, "NP,*,F,나,*,*,*,*")?;
//! builder.add_unknown("DEFAULT", 1, 1, 1000, "SY,*,*,*,*,*,*,*")?;
//!
//! let tokenizer = Tokenizer::new(builder.build()?);
//! let mut worker = tokenizer.new_worker();
//!
//! worker.reset_sentence("가나");
//! worker.tokenize()?;
//! assert_eq!(worker.num_tokens(), 2);
//!
//! let t0 = worker.token(0);
//! assert_eq!(t0.surface(), "가");
//! assert_eq!(t0.range_char(), 0..1);
//! assert_eq!(t0.feature(), "가,NNG,*,F,가,*,*,*,*");
//!
//! let t1 = worker.token(1);
//! assert_eq!(t1.surface(), "나");
//! assert_eq!(t1.range_char(), 1..2);
//! assert_eq!(t1.total_cost(), 5 + 100 + 10 + 50);
//! # Ok(())
//! # }
//! ```

#[cfg(not(any(target_pointer_width = "32", target_pointer_width = "64")))]
compile_error!("`target_pointer_width` must be 32 or 64");

/// リトルエンディアンのバイトバッファ
pub mod byte_buffer;

/// 共通の定数
pub mod common;

/// 辞書データ構造とビルダー
pub mod dictionary;

/// エラー型の定義
pub mod errors;

/// 文の内部表現
pub mod sentence;

/// トークン型の定義
pub mod token;

/// トークナイザーの実装
pub mod tokenizer;

/// コードポイント単位の文字列
pub mod utf16;

/// 内部ユーティリティ関数
pub mod utils;

#[cfg(test)]
mod tests;

// Re-exports
pub use dictionary::{Dictionary, SystemDictionaryBuilder};
pub use errors::{MecabError, Result};
pub use tokenizer::Tokenizer;

/// このライブラリのバージョン番号
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
