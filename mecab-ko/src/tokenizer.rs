//! Viterbiアルゴリズムに基づくトークナイザー。
//!
//! このモジュールは、韓国語形態素解析のためのメイントークナイザーを提供します。
//! Viterbiアルゴリズムを使用して、入力文を最適な形態素列に分割します。
//!
//! # 主要な構造体
//!
//! - [`Tokenizer`]: 形態素解析を実行するメイントークナイザー構造体
//! - [`Worker`]: トークナイザーのワーカー。実際の解析処理を行う
//!
//! # 例
//!
//! ```no_run
//! use mecab_ko::{Dictionary, Tokenizer};
//!
//! let dict = Dictionary::from_dir("path/to/dict")?;
//! let tokenizer = Tokenizer::new(dict);
//!
//! for token in tokenizer.tokenize("아버지가 방에 들어가신다.")? {
//!     println!("{}\t{}", token.surface, token.feature);
//! }
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```
pub mod lattice;
pub mod worker;

use std::sync::Arc;

use crate::common::SENTENCE_DELIMITERS;
use crate::dictionary::Dictionary;
use crate::errors::Result;
use crate::sentence::Sentence;
use crate::token::TokenBuf;
use crate::tokenizer::lattice::{Lattice, Node};
use crate::tokenizer::worker::Worker;

/// 形態素解析を行うトークナイザー。
///
/// 辞書を`Arc`で保持するため、複製は安価です。複数のスレッドでそれぞれ
/// [`Worker`]を生成し、並列に解析できます。
#[derive(Clone)]
pub struct Tokenizer {
    dict: Arc<Dictionary>,
    max_grouping_len: Option<usize>,
}

impl Tokenizer {
    /// 新しいトークナイザーを作成します。
    ///
    /// 辞書はトークナイザーに所有権が移動します。複数のトークナイザー間で辞書を共有する
    /// 必要がある場合は、[`Tokenizer::from_shared_dictionary`]を使用してください。
    pub fn new(dict: Dictionary) -> Self {
        Self::from_shared_dictionary(Arc::new(dict))
    }

    /// 共有された辞書から新しいトークナイザーを作成します。
    ///
    /// # 例
    ///
    /// ```no_run
    /// use std::sync::Arc;
    /// use mecab_ko::{Dictionary, Tokenizer};
    ///
    /// let dict = Arc::new(Dictionary::from_dir("path/to/dict")?);
    /// let tokenizer1 = Tokenizer::from_shared_dictionary(dict.clone());
    /// let tokenizer2 = Tokenizer::from_shared_dictionary(dict);
    /// # Ok::<(), Box<dyn std::error::Error>>(())
    /// ```
    pub fn from_shared_dictionary(dict: Arc<Dictionary>) -> Self {
        Self {
            dict,
            max_grouping_len: None,
        }
    }

    /// 未知語の最大グルーピング長を指定します。
    ///
    /// デフォルトでは長さは無制限で、文字カテゴリに記録された最大長も適用されません。
    ///
    /// # 引数
    ///
    /// * `max_grouping_len` - 未知語の最大グルーピング長。0の場合は無制限です。
    pub const fn max_grouping_len(mut self, max_grouping_len: usize) -> Self {
        if max_grouping_len != 0 {
            self.max_grouping_len = Some(max_grouping_len);
        } else {
            self.max_grouping_len = None;
        }
        self
    }

    /// 辞書への参照を取得します。
    #[inline(always)]
    pub fn dictionary(&self) -> &Dictionary {
        &self.dict
    }

    /// 新しいワーカーを作成します。
    ///
    /// 各ワーカーは独立したラティス構造を保持します。
    pub fn new_worker(&self) -> Worker {
        Worker::new(self.clone())
    }

    /// 1文に対するラティスを構築します。
    ///
    /// 句読点による分割は行いません。
    pub fn build_lattice(&self, input: &str) -> Lattice {
        let mut sent = Sentence::new();
        sent.set_sentence(input);
        sent.compile(self.dict.unk_handler());
        let mut lattice = Lattice::new(sent.len_char());
        self.build_lattice_in(&sent, &mut lattice);
        lattice
    }

    /// ラティスの最良パスを探索します。
    ///
    /// # 戻り値
    ///
    /// BOSとEOSを除いた最良パスのノード。経路が存在しない場合は空です。
    ///
    /// # エラー
    ///
    /// 接続IDが接続コスト行列の範囲外の場合、[`MecabError`](crate::errors::MecabError)が返されます。
    pub fn search_best_path(&self, lattice: &mut Lattice) -> Result<Vec<Node>> {
        lattice.search_best_path(self.dict.connector())
    }

    /// コンパイル済みの文からラティスを構築します。
    ///
    /// 各位置について、既知語をトライ順に追加し、続いて未知語を追加します。
    pub(crate) fn build_lattice_in(&self, sent: &Sentence, lattice: &mut Lattice) {
        let len_char = sent.len_char();
        lattice.reset(len_char);

        let lexicon = self.dict.lexicon();
        let unk_handler = self.dict.unk_handler();

        for start_char in 0..len_char {
            let suffix = &sent.chars()[start_char..];
            let mut has_matched = false;

            for m in self.dict.trie().common_prefix_search(suffix) {
                for lm in lexicon.matches(m) {
                    lattice.append(Node::new(
                        lm.word_idx,
                        lm.word_param,
                        start_char + 1,
                        lm.end_char,
                        sent.surface(start_char, lm.end_char),
                    ));
                    has_matched = true;
                }
            }

            unk_handler.gen_unk_words(
                sent,
                start_char,
                has_matched,
                self.max_grouping_len,
                |w| {
                    let len = w.end_char() - w.start_char();
                    lattice.append(Node::new(
                        w.word_idx(),
                        w.word_param(),
                        w.start_char() + 1,
                        len,
                        sent.surface(w.start_char(), len),
                    ));
                },
            );
        }

        lattice.append_eos();
    }

    /// 文末の句読点の直後でテキストを分割します。
    ///
    /// 句読点は直前の断片に含まれます。空の断片は返しません。
    ///
    /// # 例
    ///
    /// ```
    /// use mecab_ko::Tokenizer;
    ///
    /// assert_eq!(
    ///     Tokenizer::split_by_punctuation("안녕. 잘 가!다음"),
    ///     vec!["안녕.", " 잘 가!", "다음"]
    /// );
    /// ```
    pub fn split_by_punctuation(text: &str) -> Vec<&str> {
        let mut pieces = vec![];
        let mut begin = 0;
        for (i, ch) in text.char_indices() {
            if SENTENCE_DELIMITERS.contains(&ch) {
                let end = i + ch.len_utf8();
                pieces.push(&text[begin..end]);
                begin = end;
            }
        }
        if begin < text.len() {
            pieces.push(&text[begin..]);
        }
        pieces
    }

    /// テキストをトークン化します。
    ///
    /// テキストは句読点で文に分割され、文ごとにラティスを構築して探索します。
    /// 各トークンの位置は、テキスト全体におけるコードポイント位置に補正されます。
    ///
    /// # エラー
    ///
    /// 接続IDが接続コスト行列の範囲外の場合、[`MecabError`](crate::errors::MecabError)が返されます。
    pub fn tokenize(&self, text: &str) -> Result<Vec<TokenBuf>> {
        let mut worker = self.new_worker();
        let mut tokens = vec![];
        let mut offset = 0;
        for piece in Self::split_by_punctuation(text) {
            worker.reset_sentence(piece);
            worker.tokenize()?;
            tokens.extend(worker.token_iter().map(|t| t.to_buf().shift(offset)));
            offset += worker.sent.len_char();
        }
        Ok(tokens)
    }

    /// 1文をトークン化します。
    ///
    /// 句読点による分割は行いません。
    ///
    /// # エラー
    ///
    /// 接続IDが接続コスト行列の範囲外の場合、[`MecabError`](crate::errors::MecabError)が返されます。
    pub fn tokenize_sentence(&self, sentence: &str) -> Result<Vec<TokenBuf>> {
        let mut worker = self.new_worker();
        worker.reset_sentence(sentence);
        worker.tokenize()?;
        Ok(worker.token_iter().map(|t| t.to_buf()).collect())
    }

    /// テキストを分かち書きし、表層形のリストを返します。
    ///
    /// # エラー
    ///
    /// [`tokenize`](Self::tokenize)と同じ条件でエラーが返されます。
    pub fn wakati(&self, text: &str) -> Result<Vec<String>> {
        Ok(self
            .tokenize(text)?
            .into_iter()
            .map(|t| t.surface)
            .collect())
    }

    /// テキストを分かち書きし、表層形を空白で連結した文字列を返します。
    ///
    /// # エラー
    ///
    /// [`tokenize`](Self::tokenize)と同じ条件でエラーが返されます。
    pub fn wakati_string(&self, text: &str) -> Result<String> {
        Ok(self.wakati(text)?.join(" "))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dictionary::character::{
        CategoryMapping, CharacterClass, CharacterDefinition, InvokeDefinitionMap,
    };
    use crate::dictionary::{LexType, MatrixConnector, SystemDictionaryBuilder};

    fn tokenizer() -> Tokenizer {
        let classes = InvokeDefinitionMap::new(vec![
            CharacterClass::new("DEFAULT", false, true, 0),
            CharacterClass::new("HANGUL", false, true, 2),
            CharacterClass::new("SYMBOL", true, false, 0),
        ]);
        let char_def = CharacterDefinition::from_mappings(
            classes,
            &[
                CategoryMapping::range(0xac00, 0xd7a3, "HANGUL"),
                CategoryMapping::range(0x0021, 0x002f, "SYMBOL"),
            ],
        )
        .unwrap();

        let mut conn = MatrixConnector::new(3, 3).unwrap();
        conn.put(0, 1, 5).unwrap();
        conn.put(1, 1, 10).unwrap();
        conn.put(0, 2, 5).unwrap();
        conn.put(1, 2, 20).unwrap();
        conn.put(2, 1, 20).unwrap();
        conn.put(2, 2, 20).unwrap();

        let mut builder = SystemDictionaryBuilder::new(conn, char_def);
        builder.add_word("가", 1, 1, 100, "NNG,*,F,가,*,*,*,*").unwrap();
        builder.add_word("나", 1, 1, 50, "NP,*,F,나,*,*,*,*").unwrap();
        builder.add_unknown("DEFAULT", 2, 2, 1000, "SY,*,*,*,*,*,*,*").unwrap();
        builder.add_unknown("HANGUL", 2, 2, 3000, "UNKNOWN,*,*,*,*,*,*,*").unwrap();
        builder.add_unknown("SYMBOL", 2, 2, 500, "SF,*,*,*,*,*,*,*").unwrap();
        Tokenizer::new(builder.build().unwrap())
    }

    #[test]
    fn test_tokenize_known() {
        let tokenizer = tokenizer();
        let tokens = tokenizer.tokenize("가나").unwrap();
        assert_eq!(tokens.len(), 2);
        assert_eq!(tokens[0].surface, "가");
        assert_eq!(tokens[0].range_char, 0..1);
        assert_eq!(tokens[0].lex_type, LexType::Known);
        assert_eq!(tokens[0].total_cost, 105);
        assert_eq!(tokens[1].surface, "나");
        assert_eq!(tokens[1].range_char, 1..2);
        assert_eq!(tokens[1].total_cost, 5 + 100 + 10 + 50);
        assert_eq!(tokens[1].pos(), vec!["NP"]);
    }

    #[test]
    fn test_tokenize_unknown_grouping() {
        let tokenizer = tokenizer();
        let tokens = tokenizer.tokenize("한국").unwrap();
        assert_eq!(tokens.len(), 1);
        assert_eq!(tokens[0].surface, "한국");
        assert_eq!(tokens[0].lex_type, LexType::Unknown);
        assert_eq!(tokens[0].feature, "HANGUL,UNKNOWN,*,*,*,*,*,*,*");
    }

    #[test]
    fn test_max_grouping_len() {
        let tokenizer = tokenizer().max_grouping_len(1);
        let tokens = tokenizer.tokenize("한국").unwrap();
        assert_eq!(tokens.len(), 2);
        let tokenizer = tokenizer.max_grouping_len(0);
        assert_eq!(tokenizer.tokenize("한국").unwrap().len(), 1);
    }

    #[test]
    fn test_tokenize_offsets() {
        let tokenizer = tokenizer();
        let tokens = tokenizer.tokenize("가!나").unwrap();
        let spans: Vec<_> = tokens
            .iter()
            .map(|t| (t.surface.as_str(), t.range_char.clone()))
            .collect();
        assert_eq!(spans, vec![("가", 0..1), ("!", 1..2), ("나", 2..3)]);
    }

    #[test]
    fn test_tokenize_sentence() {
        let tokenizer = tokenizer();
        let tokens = tokenizer.tokenize_sentence("가!나").unwrap();
        assert_eq!(tokens.len(), 3);
        assert_eq!(tokens[2].range_char, 2..3);
    }

    #[test]
    fn test_tokenize_empty() {
        let tokenizer = tokenizer();
        assert!(tokenizer.tokenize("").unwrap().is_empty());
        assert_eq!(tokenizer.wakati_string("").unwrap(), "");
    }

    #[test]
    fn test_wakati() {
        let tokenizer = tokenizer();
        assert_eq!(tokenizer.wakati("가나").unwrap(), vec!["가", "나"]);
        assert_eq!(tokenizer.wakati_string("가나.").unwrap(), "가 나 .");
    }

    #[test]
    fn test_split_by_punctuation() {
        assert_eq!(Tokenizer::split_by_punctuation(""), Vec::<&str>::new());
        assert_eq!(Tokenizer::split_by_punctuation("가나"), vec!["가나"]);
        assert_eq!(
            Tokenizer::split_by_punctuation("가?。나！"),
            vec!["가?", "。", "나！"]
        );
    }

    #[test]
    fn test_build_lattice() {
        let tokenizer = tokenizer();
        let lattice = tokenizer.build_lattice("가나");
        // Known words suppress HANGUL unknown words.
        assert_eq!(lattice.ends_at(1).len(), 1);
        assert_eq!(lattice.ends_at(2).len(), 1);
        assert_eq!(lattice.eos().map(|n| n.start), Some(3));
    }

    #[test]
    fn test_search_best_path() {
        let tokenizer = tokenizer();
        let mut lattice = tokenizer.build_lattice("가x");
        let path = tokenizer.search_best_path(&mut lattice).unwrap();
        assert_eq!(path.len(), 2);
        assert_eq!(path[1].surface, "x");
        assert_eq!(lattice.eos().and_then(|n| n.min_cost), Some(105 + 20 + 1000));
    }
}
