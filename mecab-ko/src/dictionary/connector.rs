//! 接続コスト計算のためのコネクター
//!
//! このモジュールは、形態素間の接続コストを計算するためのコネクターを提供します。

mod matrix_connector;

pub use crate::dictionary::connector::matrix_connector::MatrixConnector;
use crate::errors::Result;

/// コネクターのビュー機能を提供するトレイト
pub trait ConnectorView {
    /// 左接続IDの最大数を返します。
    fn num_left(&self) -> usize;

    /// 右接続IDの最大数を返します。
    fn num_right(&self) -> usize;
}

/// 接続コスト計算機能を提供するトレイト
pub trait ConnectorCost: ConnectorView {
    /// 接続行列の値を取得します。
    ///
    /// # 引数
    ///
    /// * `right_id` - 前の形態素の右接続ID
    /// * `left_id` - 後の形態素の左接続ID
    ///
    /// # 戻り値
    ///
    /// 接続コスト
    ///
    /// # エラー
    ///
    /// IDが行列の範囲外の場合、[`MecabError`](crate::errors::MecabError)が返されます。
    fn cost(&self, right_id: u16, left_id: u16) -> Result<i32>;
}
