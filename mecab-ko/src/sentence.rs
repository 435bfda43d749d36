//! 入力テキストの内部表現を提供するモジュール
//!
//! 入力文字列をコードポイント単位に分割し、各文字の文字カテゴリと、
//! 同じカテゴリ名の文字が連続する長さを前計算して保持します。

use crate::dictionary::unknown::CharClassifier;
use crate::utf16::CodePointString;

/// 入力テキストの内部表現を保持する構造体
///
/// # フィールド
///
/// * `text` - コードポイント単位でアクセスできる入力文字列
/// * `chars` - トライ検索用の文字配列
/// * `class_ids` - 各文字の主カテゴリID
/// * `groupable` - 各文字位置から同じカテゴリ名の文字が連続する数
#[derive(Default, Clone, Debug)]
pub struct Sentence {
    text: CodePointString,
    chars: Vec<char>,
    class_ids: Vec<Option<u32>>,
    groupable: Vec<usize>,
}

impl Sentence {
    /// 新しい空の `Sentence` インスタンスを生成します
    pub fn new() -> Self {
        Self::default()
    }

    /// 内部状態をクリアします
    #[inline(always)]
    pub fn clear(&mut self) {
        self.text = CodePointString::default();
        self.chars.clear();
        self.class_ids.clear();
        self.groupable.clear();
    }

    /// 入力文字列を設定します
    ///
    /// 解析を行うには [`compile`](Self::compile) を呼び出す必要があります。
    pub fn set_sentence<S>(&mut self, input: S)
    where
        S: AsRef<str>,
    {
        self.set_text(CodePointString::from(input.as_ref()));
    }

    /// UTF-16テキストを入力として設定します
    pub fn set_text(&mut self, text: CodePointString) {
        self.clear();
        self.chars = text.chars();
        self.text = text;
    }

    /// 各文字のカテゴリと、グループ化可能な長さを計算します
    ///
    /// # 引数
    ///
    /// * `classifier` - 文字カテゴリの分類器
    pub fn compile<C>(&mut self, classifier: &C)
    where
        C: CharClassifier + ?Sized,
    {
        let len = self.text.len();
        self.class_ids.reserve(len);
        for i in 0..len {
            self.class_ids
                .push(classifier.classify(self.text.char_at(i)).map(|c| c.class_id()));
        }

        self.groupable.resize(len, 1);
        let class_name = |id: Option<u32>| {
            id.and_then(|id| classifier.character_class(id))
                .map(|c| c.class_name())
        };
        for i in (1..len).rev() {
            let lhs = class_name(self.class_ids[i - 1]);
            if lhs.is_some() && lhs == class_name(self.class_ids[i]) {
                self.groupable[i - 1] = self.groupable[i] + 1;
            }
        }
    }

    /// 入力文字列への参照を返します
    #[inline(always)]
    pub fn text(&self) -> &CodePointString {
        &self.text
    }

    /// 文字配列への参照を返します
    #[inline(always)]
    pub fn chars(&self) -> &[char] {
        &self.chars
    }

    /// 文字数（コードポイント数）を返します
    #[inline(always)]
    pub fn len_char(&self) -> usize {
        self.text.len()
    }

    /// 指定された位置から`len`文字分の部分文字列を返します
    #[inline(always)]
    pub fn surface(&self, start_char: usize, len: usize) -> String {
        self.text.substring(start_char, len)
    }

    /// 指定された文字位置の主カテゴリIDを返します
    #[inline(always)]
    pub fn class_id(&self, pos_char: usize) -> Option<u32> {
        self.class_ids.get(pos_char).copied().flatten()
    }

    /// 指定された文字位置から、同じカテゴリ名の文字が連続する数を返します
    #[inline(always)]
    pub fn groupable(&self, pos_char: usize) -> usize {
        self.groupable.get(pos_char).copied().unwrap_or(1)
    }
}
