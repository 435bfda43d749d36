//! 共通接頭辞検索
//!
//! 既知語の検索は[`PrefixSearch`]トレイトを介して行われます。
//! ダブル配列トライの具体的な表現は辞書の外部に任されており、
//! このクレートは`crawdad`による実装を[`Trie`]として提供します。

use std::collections::BTreeMap;

use crate::dictionary::lexicon::WordTable;
use crate::errors::{MecabError, Result};

/// トライマッチング結果
#[derive(Debug, Eq, PartialEq, Clone)]
pub struct TrieMatch {
    /// 一致したキーのトライID
    pub value: u32,
    /// 一致したキーの長さ（コードポイント単位）
    pub end_char: usize,
}

impl TrieMatch {
    /// 新しいマッチング結果を作成します。
    #[inline(always)]
    pub const fn new(value: u32, end_char: usize) -> Self {
        Self { value, end_char }
    }
}

/// 共通接頭辞検索の機能を提供するトレイト
pub trait PrefixSearch: Send + Sync {
    /// `input`の接頭辞となる登録キーをすべて返します。
    ///
    /// # 引数
    ///
    /// * `input` - 検索対象の文字列
    ///
    /// # 戻り値
    ///
    /// 一致したキーのトライIDと長さ。短いキーから順に並びます。
    fn common_prefix_search(&self, input: &[char]) -> Vec<TrieMatch>;
}

/// ダブル配列トライ
pub struct Trie {
    da: crawdad::Trie,
}

impl Trie {
    /// レコードからトライを構築します。
    ///
    /// # エラー
    ///
    /// キーが重複している場合や空の場合、[`MecabError`]が返されます。
    pub fn from_records<I, K>(records: I) -> Result<Self>
    where
        I: IntoIterator<Item = (K, u32)>,
        K: AsRef<str>,
    {
        let mut sorted = BTreeMap::new();
        for (key, value) in records {
            let key = key.as_ref().to_string();
            if let Some(prev) = sorted.insert(key, value) {
                return Err(MecabError::invalid_argument(
                    "records",
                    format!("duplicate key with ids {prev} and {value}"),
                ));
            }
        }
        Ok(Self {
            da: crawdad::Trie::from_records(sorted)
                .map_err(|e| MecabError::invalid_argument("records", e.to_string()))?,
        })
    }

    /// 既知語の単語表からトライを再構築します。
    ///
    /// 各キーについて、先頭のレコードの文字列表の最初のフィールドを表層形とみなします。
    /// `",,SC,..."`のようにカンマで始まる文字列は、表層形`","`として扱われます。
    /// 表層形が空になるキーは登録されません。
    ///
    /// # エラー
    ///
    /// 同じ表層形が複数のキーに現れる場合、[`MecabError`]が返されます。
    pub fn from_word_table(table: &WordTable) -> Result<Self> {
        let mut records = vec![];
        for key in table.keys() {
            let Some(&record_id) = table.ids(key).first() else {
                continue;
            };
            let surface = surface_of(&table.features(record_id));
            if !surface.is_empty() {
                records.push((surface, key));
            }
        }
        Self::from_records(records)
    }
}

/// `"表層形,素性..."`の文字列から表層形を取り出します。
fn surface_of(entry: &str) -> String {
    if entry.starts_with(',') {
        return ",".to_string();
    }
    entry.split(',').next().unwrap_or_default().to_string()
}

impl PrefixSearch for Trie {
    #[inline(always)]
    fn common_prefix_search(&self, input: &[char]) -> Vec<TrieMatch> {
        self.da
            .common_prefix_search(input.iter().cloned())
            .map(|(value, end_char)| TrieMatch::new(value, end_char))
            .collect()
    }
}
