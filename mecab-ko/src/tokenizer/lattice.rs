//! ラティス（格子）構造の実装モジュール。
//!
//! このモジュールは、形態素解析におけるViterbiアルゴリズムのための
//! ラティス構造を提供します。ノードは終了位置ごとのバケットに格納され、
//! 最良の前ノードはバケット内のインデックスで参照されます。
use crate::common::BOS_EOS_CONNECTION_ID;
use crate::dictionary::connector::ConnectorCost;
use crate::dictionary::lexicon::WordParam;
use crate::dictionary::word_idx::WordIdx;
use crate::dictionary::LexType;
use crate::errors::Result;

/// ノードの種類。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NodeKind {
    /// 文頭
    Bos,
    /// 文末
    Eos,
    /// 既知語
    Known,
    /// 未知語
    Unknown,
}

/// ラティス内のノード。
///
/// 位置はすべて1始まりのコードポイント位置です。BOSの終了位置は0です。
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Node {
    /// 単語レコードのバイトオフセット。BOSとEOSでは`u32::MAX`。
    pub word_id: u32,
    /// ノードの種類。
    pub kind: NodeKind,
    /// 開始位置。
    pub start: usize,
    /// 長さ（コードポイント数）。
    pub len: usize,
    /// 左側の接続ID。
    pub left_id: u16,
    /// 右側の接続ID。
    pub right_id: u16,
    /// 単語コスト。
    pub word_cost: i32,
    /// 表層形。
    pub surface: String,
    /// BOSからこのノードまでの最小コスト。未到達の場合は`None`。
    pub min_cost: Option<i32>,
    /// 最小コストを与える前ノードの、`start - 1`で終わるバケット内でのインデックス。
    pub min_idx: Option<usize>,
}

impl Node {
    /// 単語レコードから既知語または未知語のノードを作成します。
    ///
    /// # 引数
    ///
    /// * `word_idx` - 単語インデックス
    /// * `word_param` - 単語パラメータ
    /// * `start` - 1始まりの開始位置
    /// * `surface` - 表層形
    /// * `len` - 長さ（コードポイント数）
    pub fn new(
        word_idx: WordIdx,
        word_param: WordParam,
        start: usize,
        len: usize,
        surface: String,
    ) -> Self {
        let kind = match word_idx.lex_type {
            LexType::Known => NodeKind::Known,
            LexType::Unknown => NodeKind::Unknown,
        };
        Self {
            word_id: word_idx.word_id,
            kind,
            start,
            len,
            left_id: word_param.left_id,
            right_id: word_param.right_id,
            word_cost: i32::from(word_param.word_cost),
            surface,
            min_cost: None,
            min_idx: None,
        }
    }

    fn sentinel(kind: NodeKind, start: usize) -> Self {
        Self {
            word_id: u32::MAX,
            kind,
            start,
            len: 0,
            left_id: BOS_EOS_CONNECTION_ID,
            right_id: BOS_EOS_CONNECTION_ID,
            word_cost: 0,
            surface: String::new(),
            min_cost: if kind == NodeKind::Bos { Some(0) } else { None },
            min_idx: None,
        }
    }

    /// 終了位置を返します。
    #[inline(always)]
    pub fn end(&self) -> usize {
        (self.start + self.len).saturating_sub(1)
    }

    /// 単語インデックスを返します。
    #[inline(always)]
    pub fn word_idx(&self) -> WordIdx {
        let lex_type = match self.kind {
            NodeKind::Unknown => LexType::Unknown,
            _ => LexType::Known,
        };
        WordIdx::new(lex_type, self.word_id)
    }

    /// このノードがBOSから到達可能かどうかを判定します。
    #[inline(always)]
    pub fn is_connected_to_bos(&self) -> bool {
        self.min_cost.is_some()
    }
}

/// 1-best解用のラティス構造体。
pub struct Lattice {
    ends: Vec<Vec<Node>>,
    eos: Option<Node>,
    max_end: usize,
}

impl Default for Lattice {
    fn default() -> Self {
        Self::new(0)
    }
}

impl Lattice {
    /// BOSノードだけを持つラティスを作成します。
    ///
    /// # 引数
    ///
    /// * `len_char` - 文の文字数。バケットの初期容量に使われます。
    pub fn new(len_char: usize) -> Self {
        let mut lattice = Self {
            ends: Vec::with_capacity(len_char + 1),
            eos: None,
            max_end: 0,
        };
        lattice.reset(len_char);
        lattice
    }

    /// ラティスをリセットし、新しい文の処理を準備します。
    pub fn reset(&mut self, len_char: usize) {
        for v in self.ends.iter_mut() {
            v.clear();
        }
        if self.ends.len() < len_char + 1 {
            self.ends.resize_with(len_char + 1, Vec::new);
        }
        self.eos = None;
        self.max_end = 0;
        self.ends[0].push(Node::sentinel(NodeKind::Bos, 0));
    }

    /// ノードを終了位置のバケットに追加します。
    pub fn append(&mut self, node: Node) {
        debug_assert!(node.start >= 1 && node.len >= 1);
        let end = node.end();
        if self.ends.len() <= end {
            self.ends.resize_with(end + 1, Vec::new);
        }
        self.max_end = self.max_end.max(end);
        self.ends[end].push(node);
    }

    /// 最大の終了位置の次を開始位置とするEOSノードを追加します。
    pub fn append_eos(&mut self) {
        self.eos = Some(Node::sentinel(NodeKind::Eos, self.max_end + 1));
    }

    /// BOSノードを返します。
    #[inline(always)]
    pub fn bos(&self) -> &Node {
        &self.ends[0][0]
    }

    /// EOSノードを返します。
    #[inline(always)]
    pub fn eos(&self) -> Option<&Node> {
        self.eos.as_ref()
    }

    /// 指定位置で終わるノードを返します。
    #[inline(always)]
    pub fn ends_at(&self, end: usize) -> &[Node] {
        self.ends.get(end).map_or(&[][..], Vec::as_slice)
    }

    /// 観測された最大の終了位置を返します。
    #[inline(always)]
    pub const fn max_end(&self) -> usize {
        self.max_end
    }

    /// 前向き計算と後ろ向き探索を行い、最良パスのノードを左から順に返します。
    ///
    /// BOSとEOSは結果に含まれません。
    ///
    /// # エラー
    ///
    /// 接続コストの参照が範囲外の場合、[`MecabError`](crate::errors::MecabError)が返されます。
    pub fn search_best_path<C>(&mut self, connector: &C) -> Result<Vec<Node>>
    where
        C: ConnectorCost + ?Sized,
    {
        self.forward(connector)?;
        Ok(self.backward())
    }

    /// 各ノードの最小コストと最良の前ノードを計算します。
    pub fn forward<C>(&mut self, connector: &C) -> Result<()>
    where
        C: ConnectorCost + ?Sized,
    {
        for end in 1..=self.max_end {
            let (left, right) = self.ends.split_at_mut(end);
            for node in right[0].iter_mut() {
                let prevs = &left[node.start - 1];
                let best = search_min_node(prevs, node.left_id, connector)?;
                node.min_idx = best.map(|(i, _)| i);
                node.min_cost = best.map(|(_, c)| c.saturating_add(node.word_cost));
            }
        }
        if let Some(eos) = self.eos.as_mut() {
            let prevs = self.ends.get(eos.start - 1).map_or(&[][..], Vec::as_slice);
            let best = search_min_node(prevs, eos.left_id, connector)?;
            eos.min_idx = best.map(|(i, _)| i);
            eos.min_cost = best.map(|(_, c)| c);
        }
        Ok(())
    }

    /// EOSから前ノードをたどり、最良パスを返します。
    ///
    /// 途中でリンクが欠けている場合は空の結果を返します。
    pub fn backward(&self) -> Vec<Node> {
        let Some(eos) = self.eos.as_ref() else {
            return vec![];
        };
        let mut path = vec![];
        let mut end = eos.start - 1;
        let mut idx = eos.min_idx;
        while end != 0 {
            let Some(node) = idx.and_then(|i| self.ends.get(end)?.get(i)) else {
                return vec![];
            };
            path.push(node.clone());
            end = node.start - 1;
            idx = node.min_idx;
        }
        if idx.is_none() {
            return vec![];
        }
        path.reverse();
        path
    }
}

fn search_min_node<C>(prevs: &[Node], left_id: u16, connector: &C) -> Result<Option<(usize, i32)>>
where
    C: ConnectorCost + ?Sized,
{
    let mut best: Option<(usize, i32)> = None;
    for (i, prev) in prevs.iter().enumerate() {
        let Some(prev_cost) = prev.min_cost else {
            continue;
        };
        let new_cost = prev_cost.saturating_add(connector.cost(prev.right_id, left_id)?);
        // Strict comparison keeps the first-encountered predecessor on ties.
        if best.map_or(true, |(_, min_cost)| new_cost < min_cost) {
            best = Some((i, new_cost));
        }
    }
    Ok(best)
}
