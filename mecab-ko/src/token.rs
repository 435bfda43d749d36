//! トークンの結果コンテナ
//!
//! このモジュールは、形態素解析の結果として得られるトークンを表現する型を提供します。
//! トークンは辞書内の単語への参照を保持し、表層形、品詞情報、位置情報などへの
//! アクセスを提供します。
//!
//! 素性文字列はmecab-ko-dicの並びに従います。
//!
//! ```text
//! 表層形,品詞,意味分類,終声有無,読み,タイプ,先頭品詞,末尾品詞,表現
//! ```

use std::ops::Range;

use crate::dictionary::{LexType, WordIdx};
use crate::tokenizer::lattice::Node;
use crate::tokenizer::worker::Worker;

const POS_FIELD: usize = 1;

/// 素性文字列をカンマで分割します。
fn split_features(feature: &str) -> Vec<&str> {
    if feature.is_empty() {
        return vec![];
    }
    feature.split(',').collect()
}

/// 素性文字列から品詞タグを取り出します。
///
/// 活用形などの複合タグは`+`で分割されます。
fn pos_tags(feature: &str) -> Vec<&str> {
    feature
        .split(',')
        .nth(POS_FIELD)
        .map(|pos| pos.split('+').collect())
        .unwrap_or_default()
}

/// 形態素解析の結果トークン
///
/// このトークンは[`Worker`]への軽量な参照であり、実際のデータは
/// Workerが保持しています。トークンはWorkerが生存している間のみ有効です。
pub struct Token<'w> {
    worker: &'w Worker,
    index: usize,
}

impl<'w> Token<'w> {
    #[inline(always)]
    pub(crate) const fn new(worker: &'w Worker, index: usize) -> Self {
        Self { worker, index }
    }

    #[inline(always)]
    fn node(&self) -> &'w Node {
        &self.worker.top_nodes[self.index]
    }

    /// トークンの文字単位の位置範囲を取得します。
    ///
    /// # 戻り値
    ///
    /// 文中の開始位置から終了位置までのコードポイント単位の範囲（0始まり）
    #[inline(always)]
    pub fn range_char(&self) -> Range<usize> {
        let node = self.node();
        node.start - 1..node.end()
    }

    /// トークンの表層形を取得します。
    #[inline(always)]
    pub fn surface(&self) -> &'w str {
        &self.node().surface
    }

    /// トークンの単語インデックスを取得します。
    #[inline(always)]
    pub fn word_idx(&self) -> WordIdx {
        self.node().word_idx()
    }

    /// トークンの素性文字列を取得します。
    ///
    /// # 戻り値
    ///
    /// 文字列表に格納された`"表層形,素性..."`の文字列
    #[inline(always)]
    pub fn feature(&self) -> String {
        self.worker.tokenizer.dictionary().word_feature(self.word_idx())
    }

    /// トークンが由来する語彙の種類を取得します。
    #[inline(always)]
    pub fn lex_type(&self) -> LexType {
        self.word_idx().lex_type
    }

    /// トークンノードの左文脈IDを取得します。
    #[inline(always)]
    pub fn left_id(&self) -> u16 {
        self.node().left_id
    }

    /// トークンノードの右文脈IDを取得します。
    #[inline(always)]
    pub fn right_id(&self) -> u16 {
        self.node().right_id
    }

    /// トークンノードの単語コストを取得します。
    #[inline(always)]
    pub fn word_cost(&self) -> i32 {
        self.node().word_cost
    }

    /// 文頭からこのトークンノードまでの累積コストを取得します。
    #[inline(always)]
    pub fn total_cost(&self) -> i32 {
        self.node().min_cost.unwrap_or_default()
    }

    /// このトークンビューを所有型の[`TokenBuf`]に変換します。
    pub fn to_buf(&self) -> TokenBuf {
        TokenBuf {
            surface: self.surface().to_string(),
            feature: self.feature(),
            range_char: self.range_char(),
            word_id: self.word_idx(),
            lex_type: self.lex_type(),
            left_id: self.left_id(),
            right_id: self.right_id(),
            word_cost: self.word_cost(),
            total_cost: self.total_cost(),
        }
    }
}

impl std::fmt::Debug for Token<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Token")
            .field("surface", &self.surface())
            .field("range_char", &self.range_char())
            .field("feature", &self.feature())
            .field("lex_type", &self.lex_type())
            .field("word_id", &self.word_idx())
            .field("left_id", &self.left_id())
            .field("right_id", &self.right_id())
            .field("word_cost", &self.word_cost())
            .field("total_cost", &self.total_cost())
            .finish()
    }
}

/// [`Token`]のイテレータ
pub struct TokenIter<'w> {
    worker: &'w Worker,
    i: usize,
}

impl<'w> TokenIter<'w> {
    #[inline(always)]
    pub(crate) const fn new(worker: &'w Worker, i: usize) -> Self {
        Self { worker, i }
    }
}

impl<'w> Iterator for TokenIter<'w> {
    type Item = Token<'w>;

    #[inline(always)]
    fn next(&mut self) -> Option<Self::Item> {
        if self.i < self.worker.num_tokens() {
            let t = self.worker.token(self.i);
            self.i += 1;
            Some(t)
        } else {
            None
        }
    }
}

/// 所有型のトークン
///
/// [`Worker`]から独立して保持できるトークンです。
/// [`Tokenizer::tokenize`](crate::Tokenizer::tokenize)はこの型を返し、
/// `range_char`は入力テキスト全体における位置を表します。
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TokenBuf {
    /// 表層形
    pub surface: String,
    /// 素性文字列
    pub feature: String,
    /// コードポイント単位の位置範囲（0始まり）
    pub range_char: Range<usize>,
    /// 単語インデックス
    pub word_id: WordIdx,
    /// 語彙の種類
    pub lex_type: LexType,
    /// 左文脈ID
    pub left_id: u16,
    /// 右文脈ID
    pub right_id: u16,
    /// 単語コスト
    pub word_cost: i32,
    /// 文頭からの累積コスト
    pub total_cost: i32,
}

impl TokenBuf {
    /// 素性文字列をカンマで分割して返します。
    ///
    /// 先頭の要素は表層形です。
    pub fn features(&self) -> Vec<&str> {
        split_features(&self.feature)
    }

    /// 品詞タグを返します。
    ///
    /// 素性の2番目のフィールドを`+`で分割したものです。
    /// 例えば`VV+EP`は`["VV", "EP"]`になります。
    pub fn pos(&self) -> Vec<&str> {
        pos_tags(&self.feature)
    }

    /// 位置範囲を`offset`だけずらします。
    pub(crate) fn shift(mut self, offset: usize) -> Self {
        self.range_char = self.range_char.start + offset..self.range_char.end + offset;
        self
    }
}

impl From<Token<'_>> for TokenBuf {
    fn from(token: Token<'_>) -> Self {
        token.to_buf()
    }
}
