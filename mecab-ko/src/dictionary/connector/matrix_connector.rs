//! 行列ベースのコネクター実装
//!
//! 接続コストを`i16`の平坦な配列として保持します。
//! 配列の先頭2要素には行列の次元が記録され、コストはその後ろに行優先で並びます。

use crate::byte_buffer::ByteBuffer;
use crate::dictionary::connector::{ConnectorCost, ConnectorView};
use crate::errors::{MecabError, Result};

const HEADER_LEN: usize = 2;

/// 接続コストの行列
///
/// 右側の品詞IDが行、左側の品詞IDが列に対応します。
pub struct MatrixConnector {
    /// 先頭2要素が次元、以降が接続コストの平坦化された配列
    data: Vec<i16>,
    /// 右接続IDの数
    forward_size: usize,
    /// 左接続IDの数
    backward_size: usize,
}

impl MatrixConnector {
    /// すべてのコストが0の行列を作成します。
    ///
    /// # 引数
    ///
    /// * `forward_size` - 右接続IDの数
    /// * `backward_size` - 左接続IDの数
    ///
    /// # エラー
    ///
    /// 次元が16ビットに収まらない場合、[`MecabError`]が返されます。
    pub fn new(forward_size: usize, backward_size: usize) -> Result<Self> {
        let forward = i16::try_from(forward_size)?;
        let backward = i16::try_from(backward_size)?;
        let mut data = vec![0; forward_size * backward_size + HEADER_LEN];
        data[0] = forward;
        data[1] = backward;
        Ok(Self {
            data,
            forward_size,
            backward_size,
        })
    }

    fn index(&self, right_id: u16, left_id: u16) -> Result<usize> {
        let (right, left) = (usize::from(right_id), usize::from(left_id));
        if right >= self.forward_size || left >= self.backward_size {
            return Err(MecabError::invalid_state(
                "connection id is out of range",
                format!(
                    "right_id={right_id}, left_id={left_id}, dims={}x{}",
                    self.forward_size, self.backward_size
                ),
            ));
        }
        let index = right * self.backward_size + left + HEADER_LEN;
        if index >= self.data.len() {
            return Err(MecabError::invalid_state(
                "connection cost index is out of range",
                format!("index={index}, len={}", self.data.len()),
            ));
        }
        Ok(index)
    }

    /// 接続コストを設定します。
    ///
    /// # エラー
    ///
    /// IDが範囲外の場合、[`MecabError`]が返されます。
    pub fn put(&mut self, right_id: u16, left_id: u16, cost: i16) -> Result<()> {
        let index = self.index(right_id, left_id)?;
        self.data[index] = cost;
        Ok(())
    }

    /// `cc.dat`形式のバイト列から行列を読み込みます。
    ///
    /// 形式は、`i16`の右接続ID数、`i16`の左接続ID数、行優先の`i16`コスト列です。
    /// 全体がリトルエンディアンです。
    ///
    /// # エラー
    ///
    /// バイト長が奇数の場合や、ヘッダが欠けている場合、[`MecabError`]が返されます。
    pub fn from_bytes(bytes: &[u8]) -> Result<Self> {
        if bytes.len() % 2 != 0 {
            return Err(MecabError::invalid_format(
                "cc.dat",
                "the byte length must be a multiple of 2",
            ));
        }
        if bytes.len() < HEADER_LEN * 2 {
            return Err(MecabError::invalid_format(
                "cc.dat",
                "the matrix header is missing",
            ));
        }
        let data: Vec<i16> = bytes
            .chunks_exact(2)
            .map(|b| i16::from_le_bytes([b[0], b[1]]))
            .collect();
        let forward_size = usize::try_from(data[0])?;
        let backward_size = usize::try_from(data[1])?;
        Ok(Self {
            data,
            forward_size,
            backward_size,
        })
    }

    /// `cc.dat`形式のバイト列を出力します。
    pub fn to_bytes(&self) -> Result<Vec<u8>> {
        let mut buf = ByteBuffer::with_size(self.data.len() * 2);
        for &v in &self.data {
            buf.put_short(i32::from(v))?;
        }
        Ok(buf.into_bytes())
    }
}

impl ConnectorView for MatrixConnector {
    #[inline(always)]
    fn num_left(&self) -> usize {
        self.backward_size
    }

    #[inline(always)]
    fn num_right(&self) -> usize {
        self.forward_size
    }
}

impl ConnectorCost for MatrixConnector {
    #[inline(always)]
    fn cost(&self, right_id: u16, left_id: u16) -> Result<i32> {
        let index = self.index(right_id, left_id)?;
        Ok(i32::from(self.data[index]))
    }
}
