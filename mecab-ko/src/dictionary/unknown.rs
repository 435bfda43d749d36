//! 未知語処理モジュール
//!
//! このモジュールは、辞書に登録されていない未知語を処理するための
//! 機能を提供します。未知語レコードは文字カテゴリIDをキーとして引かれます。

use crate::dictionary::character::{CharacterClass, CharacterDefinition};
use crate::dictionary::connector::ConnectorView;
use crate::dictionary::lexicon::{verify_table, WordParam, WordTable};
use crate::dictionary::word_idx::WordIdx;
use crate::dictionary::LexType;
use crate::sentence::Sentence;

/// 文字を文字カテゴリに分類する機能を提供するトレイト
pub trait CharClassifier {
    /// 1文字分のUTF-16コードユニットの主カテゴリを返します。
    fn classify(&self, ch: &[u16]) -> Option<&CharacterClass>;

    /// カテゴリIDからカテゴリを取得します。
    fn character_class(&self, class_id: u32) -> Option<&CharacterClass>;
}

/// 未知語として生成される単語
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnkWord {
    start_char: usize,
    end_char: usize,
    word_param: WordParam,
    word_id: u32,
}

impl UnkWord {
    /// 開始位置（0始まりのコードポイント位置）を返します。
    #[inline(always)]
    pub const fn start_char(&self) -> usize {
        self.start_char
    }

    /// 終了位置（排他的）を返します。
    #[inline(always)]
    pub const fn end_char(&self) -> usize {
        self.end_char
    }

    /// 単語パラメータを返します。
    #[inline(always)]
    pub const fn word_param(&self) -> WordParam {
        self.word_param
    }

    /// 単語インデックスを返します。
    #[inline(always)]
    pub const fn word_idx(&self) -> WordIdx {
        WordIdx::new(LexType::Unknown, self.word_id)
    }
}

/// 未知語ハンドラー
///
/// 未知語の単語表と、文字カテゴリ表を保持します。
pub struct UnkHandler {
    table: WordTable,
    char_def: CharacterDefinition,
}

impl UnkHandler {
    /// 新しいインスタンスを作成します。
    pub fn new(table: WordTable, char_def: CharacterDefinition) -> Self {
        Self { table, char_def }
    }

    /// 文字カテゴリ表を返します。
    #[inline(always)]
    pub fn char_def(&self) -> &CharacterDefinition {
        &self.char_def
    }

    /// 内部の単語表を返します。
    #[inline(always)]
    pub fn table(&self) -> &WordTable {
        &self.table
    }

    /// 単語のパラメータを取得します。
    #[inline(always)]
    pub fn word_param(&self, word_idx: WordIdx) -> WordParam {
        debug_assert_eq!(word_idx.lex_type, LexType::Unknown);
        self.table.word_param(word_idx.word_id)
    }

    /// 単語の素性を取得します。
    #[inline(always)]
    pub fn word_feature(&self, word_idx: WordIdx) -> String {
        debug_assert_eq!(word_idx.lex_type, LexType::Unknown);
        self.table.features(word_idx.word_id)
    }

    /// 未知語レコードの接続IDが、コネクターで有効かどうかをチェックします。
    pub fn verify<C>(&self, conn: &C) -> bool
    where
        C: ConnectorView,
    {
        verify_table(&self.table, conn)
    }

    /// 指定位置から始まる未知語を生成します。
    ///
    /// 既知語が見つかっていない場合か、文字カテゴリが常時起動の場合にのみ生成します。
    /// グループ化カテゴリでは、同じカテゴリ名の文字が続く限り範囲を伸ばします。
    ///
    /// # 引数
    ///
    /// * `sent` - 入力文
    /// * `start_char` - 開始位置
    /// * `has_matched` - この位置で既知語が見つかったかどうか
    /// * `max_grouping_len` - グループ化の最大長。`None`の場合は無制限
    /// * `f` - 生成された未知語を受け取るクロージャ
    pub fn gen_unk_words<F>(
        &self,
        sent: &Sentence,
        start_char: usize,
        has_matched: bool,
        max_grouping_len: Option<usize>,
        mut f: F,
    ) where
        F: FnMut(UnkWord),
    {
        let Some(class) = sent
            .class_id(start_char)
            .and_then(|id| self.character_class(id))
        else {
            return;
        };
        if has_matched && !class.is_always_invoke() {
            return;
        }

        let mut len = 1;
        if class.is_grouping() {
            len = sent.groupable(start_char);
            if let Some(max) = max_grouping_len {
                len = len.min(max.max(1));
            }
        }

        for &word_id in self.table.ids(class.class_id()) {
            f(UnkWord {
                start_char,
                end_char: start_char + len,
                word_param: self.table.word_param(word_id),
                word_id,
            });
        }
    }
}

impl CharClassifier for UnkHandler {
    #[inline(always)]
    fn classify(&self, ch: &[u16]) -> Option<&CharacterClass> {
        self.char_def.lookup(ch)
    }

    #[inline(always)]
    fn character_class(&self, class_id: u32) -> Option<&CharacterClass> {
        self.char_def.invoke_definition_map().character_class(class_id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dictionary::builder::WordTableBuilder;
    use crate::dictionary::character::{CategoryMapping, InvokeDefinitionMap};

    fn handler() -> UnkHandler {
        let classes = InvokeDefinitionMap::new(vec![
            CharacterClass::new("DEFAULT", false, true, 0),
            CharacterClass::new("HANGUL", false, true, 2),
            CharacterClass::new("SYMBOL", true, false, 0),
        ]);
        let mappings = vec![
            CategoryMapping::range(0xac00, 0xd7a3, "HANGUL"),
            CategoryMapping::range(0x0021, 0x002f, "SYMBOL"),
        ];
        let char_def = CharacterDefinition::from_mappings(classes, &mappings).unwrap();

        let mut b = WordTableBuilder::new();
        b.push(0, 1, 1, 1000, "DEFAULT,SY").unwrap();
        b.push(1, 2, 2, 800, "HANGUL,NNG").unwrap();
        b.push(1, 3, 3, 900, "HANGUL,NNP").unwrap();
        b.push(2, 4, 4, 500, "SYMBOL,SY").unwrap();
        let (records, strings, id_map) = b.build();
        UnkHandler::new(WordTable::load(records, strings, &id_map), char_def)
    }

    fn gen(
        handler: &UnkHandler,
        text: &str,
        start: usize,
        has_matched: bool,
        max: Option<usize>,
    ) -> Vec<UnkWord> {
        let mut sent = Sentence::new();
        sent.set_sentence(text);
        sent.compile(handler);
        let mut words = vec![];
        handler.gen_unk_words(&sent, start, has_matched, max, |w| words.push(w));
        words
    }

    #[test]
    fn test_grouping() {
        let handler = handler();
        let words = gen(&handler, "한국a", 0, false, None);
        assert_eq!(words.len(), 2);
        assert_eq!((words[0].start_char(), words[0].end_char()), (0, 2));
        assert_eq!(words[0].word_param(), WordParam::new(2, 2, 800));
        assert_eq!(words[1].word_param(), WordParam::new(3, 3, 900));
        assert_eq!(handler.word_feature(words[1].word_idx()), "HANGUL,NNP");
    }

    #[test]
    fn test_grouping_unbounded() {
        let handler = handler();
        // The declared max length of HANGUL is not applied.
        let words = gen(&handler, "한국어입니다", 0, false, None);
        assert_eq!(words[0].end_char(), 6);
        let words = gen(&handler, "한국어입니다", 0, false, Some(3));
        assert_eq!(words[0].end_char(), 3);
    }

    #[test]
    fn test_has_matched() {
        let handler = handler();
        assert!(gen(&handler, "한국", 0, true, None).is_empty());
        // SYMBOL is always invoked.
        let words = gen(&handler, "!!", 0, true, None);
        assert_eq!(words.len(), 1);
        assert_eq!(words[0].end_char(), 1);
    }

    #[test]
    fn test_default() {
        let handler = handler();
        let words = gen(&handler, "x😀", 1, false, None);
        assert_eq!(words.len(), 1);
        assert_eq!((words[0].start_char(), words[0].end_char()), (1, 2));
        assert_eq!(handler.word_feature(words[0].word_idx()), "DEFAULT,SY");
    }
}
