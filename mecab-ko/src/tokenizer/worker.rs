//! トークン化処理のためのルーチンを提供するモジュール。
//!
//! このモジュールは、形態素解析のための主要なワーカー構造体を提供します。
//! ワーカーは内部データ構造を保持し、再利用することで不要なメモリアロケーションを避けます。
use crate::errors::Result;
use crate::sentence::Sentence;
use crate::token::{Token, TokenIter};
use crate::tokenizer::lattice::{Lattice, Node};
use crate::tokenizer::Tokenizer;

/// トークン化処理のためのルーチンを提供する構造体。
///
/// トークン化に使用される内部データ構造を保持し、それらを再利用することで
/// 不要なメモリ再割り当てを回避します。入力は1文として扱われ、
/// 句読点による分割は行われません。
///
/// # 例
///
/// ```ignore
/// let mut worker = tokenizer.new_worker();
/// worker.reset_sentence("한국어 문장");
/// worker.tokenize()?;
/// for token in worker.token_iter() {
///     println!("{}", token.surface());
/// }
/// ```
pub struct Worker {
    pub(crate) tokenizer: Tokenizer,
    pub(crate) sent: Sentence,
    pub(crate) lattice: Lattice,
    pub(crate) top_nodes: Vec<Node>,
}

impl Worker {
    /// 新しいインスタンスを作成します。
    pub(crate) fn new(tokenizer: Tokenizer) -> Self {
        Self {
            tokenizer,
            sent: Sentence::new(),
            lattice: Lattice::default(),
            top_nodes: vec![],
        }
    }

    /// トークン化する入力文をリセットします。
    ///
    /// # 引数
    ///
    /// * `input` - トークン化する入力文字列
    pub fn reset_sentence<S>(&mut self, input: S)
    where
        S: AsRef<str>,
    {
        self.sent.clear();
        self.top_nodes.clear();
        let input = input.as_ref();
        if !input.is_empty() {
            self.sent.set_sentence(input);
            self.sent.compile(self.tokenizer.dictionary().unk_handler());
        }
    }

    /// 入力文をトークン化します。
    ///
    /// 結果は[`token`](Self::token)や[`token_iter`](Self::token_iter)で取得できます。
    /// 文頭から文末までの経路が存在しない場合、トークンは0個になります。
    ///
    /// # エラー
    ///
    /// 接続IDが接続コスト行列の範囲外の場合、[`MecabError`](crate::errors::MecabError)が返されます。
    pub fn tokenize(&mut self) -> Result<()> {
        self.top_nodes.clear();
        if self.sent.len_char() == 0 {
            return Ok(());
        }
        self.tokenizer.build_lattice_in(&self.sent, &mut self.lattice);
        self.top_nodes = self
            .lattice
            .search_best_path(self.tokenizer.dictionary().connector())?;
        Ok(())
    }

    /// トークンの数を取得します。
    #[inline(always)]
    pub fn num_tokens(&self) -> usize {
        self.top_nodes.len()
    }

    /// `i`番目のトークンを取得します。
    ///
    /// # パニック
    ///
    /// `i`がトークンの数以上の場合にパニックします。
    #[inline(always)]
    pub fn token<'w>(&'w self, i: usize) -> Token<'w> {
        assert!(i < self.num_tokens(), "token index out of range");
        Token::new(self, i)
    }

    /// トークンのイテレータを作成します。
    #[inline(always)]
    pub const fn token_iter<'w>(&'w self) -> TokenIter<'w> {
        TokenIter::new(self, 0)
    }

    /// 直前に構築したラティスを返します。
    #[inline(always)]
    pub fn lattice(&self) -> &Lattice {
        &self.lattice
    }
}
