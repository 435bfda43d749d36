//! 既知語の語彙情報を管理するモジュール
//!
//! このモジュールは、トライIDから単語レコードを引く既知語表を提供します。

mod param;
mod word_table;

use crate::dictionary::connector::ConnectorView;
use crate::dictionary::trie::TrieMatch;
use crate::dictionary::word_idx::WordIdx;
use crate::dictionary::LexType;

pub use crate::dictionary::lexicon::param::WordParam;
pub use crate::dictionary::lexicon::word_table::WordTable;

/// 既知語の語彙情報
pub struct Lexicon {
    table: WordTable,
}

impl Lexicon {
    /// 単語表から既知語表を作成します。
    pub fn new(table: WordTable) -> Self {
        Self { table }
    }

    /// `tid.dat`、`tid_pos.dat`、`tid_map.dat`の内容から既知語表を読み込みます。
    pub fn load(records: Vec<u8>, strings: Vec<u8>, id_map: &[u8]) -> Self {
        Self::new(WordTable::load(records, strings, id_map))
    }

    /// トライの一致結果に対応する単語を返すイテレータを取得します。
    ///
    /// # 引数
    ///
    /// * `m` - トライの一致結果
    ///
    /// # 戻り値
    ///
    /// 一致する単語のイテレータ。レコードの登録順に並びます。
    #[inline(always)]
    pub fn matches(&self, m: TrieMatch) -> impl Iterator<Item = LexMatch> + '_ {
        self.table.ids(m.value).iter().map(move |&word_id| {
            LexMatch::new(
                WordIdx::new(LexType::Known, word_id),
                self.table.word_param(word_id),
                m.end_char,
            )
        })
    }

    /// 単語のパラメータを取得します。
    #[inline(always)]
    pub fn word_param(&self, word_idx: WordIdx) -> WordParam {
        debug_assert_eq!(word_idx.lex_type, LexType::Known);
        self.table.word_param(word_idx.word_id)
    }

    /// 単語の素性を取得します。
    #[inline(always)]
    pub fn word_feature(&self, word_idx: WordIdx) -> String {
        debug_assert_eq!(word_idx.lex_type, LexType::Known);
        self.table.features(word_idx.word_id)
    }

    /// 内部の単語表を返します。
    #[inline(always)]
    pub fn table(&self) -> &WordTable {
        &self.table
    }

    /// ID対応表から参照されるすべてのレコードの接続IDが、コネクターで有効かどうかをチェックします。
    ///
    /// # 戻り値
    ///
    /// すべてのIDが有効な場合は `true`
    pub fn verify<C>(&self, conn: &C) -> bool
    where
        C: ConnectorView,
    {
        verify_table(&self.table, conn)
    }
}

pub(crate) fn verify_table<C>(table: &WordTable, conn: &C) -> bool
where
    C: ConnectorView,
{
    table.keys().all(|key| {
        table.ids(key).iter().all(|&word_id| {
            let p = table.word_param(word_id);
            usize::from(p.left_id) < conn.num_left() && usize::from(p.right_id) < conn.num_right()
        })
    })
}

/// 既知語の検索結果
#[derive(Eq, PartialEq, Debug)]
pub struct LexMatch {
    pub word_idx: WordIdx,
    pub word_param: WordParam,
    pub end_char: usize,
}

impl LexMatch {
    #[inline(always)]
    pub const fn new(word_idx: WordIdx, word_param: WordParam, end_char: usize) -> Self {
        Self {
            word_idx,
            word_param,
            end_char,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dictionary::builder::WordTableBuilder;
    use crate::dictionary::connector::MatrixConnector;

    fn lexicon() -> Lexicon {
        let mut b = WordTableBuilder::new();
        b.push(0, 1, 2, 3, "한국,NNP").unwrap();
        b.push(1, 4, 5, 6, "한국어,NNG").unwrap();
        b.push(0, 7, 8, -9, "한국,NNG").unwrap();
        let (records, strings, id_map) = b.build();
        Lexicon::load(records, strings, &id_map)
    }

    #[test]
    fn test_matches() {
        let lexicon = lexicon();
        let mut it = lexicon.matches(TrieMatch::new(0, 2));
        assert_eq!(
            it.next().unwrap(),
            LexMatch::new(
                WordIdx::new(LexType::Known, 0),
                WordParam::new(1, 2, 3),
                2
            )
        );
        assert_eq!(
            it.next().unwrap(),
            LexMatch::new(
                WordIdx::new(LexType::Known, 20),
                WordParam::new(7, 8, -9),
                2
            )
        );
        assert_eq!(it.next(), None);
        assert_eq!(lexicon.matches(TrieMatch::new(9, 1)).count(), 0);
    }

    #[test]
    fn test_word_feature() {
        let lexicon = lexicon();
        assert_eq!(
            lexicon.word_feature(WordIdx::new(LexType::Known, 10)),
            "한국어,NNG"
        );
        assert_eq!(
            lexicon.word_param(WordIdx::new(LexType::Known, 10)),
            WordParam::new(4, 5, 6)
        );
    }

    #[test]
    fn test_verify() {
        let lexicon = lexicon();
        assert!(lexicon.verify(&MatrixConnector::new(9, 9).unwrap()));
        assert!(!lexicon.verify(&MatrixConnector::new(9, 5).unwrap()));
    }
}
