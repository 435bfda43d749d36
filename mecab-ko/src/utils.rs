//! ユーティリティ関数と型変換トレイトを提供するモジュール

/// u32から他の型への変換を提供するトレイト
///
/// 標準ライブラリのFromトレイトとは異なり、ポインタ幅に関する仮定を置いて変換します。
pub trait FromU32 {
    /// u32値から実装型を生成する
    fn from_u32(src: u32) -> Self;
}

#[cfg(any(target_pointer_width = "32", target_pointer_width = "64"))]
impl FromU32 for usize {
    #[inline(always)]
    fn from_u32(src: u32) -> Self {
        // Since the pointer width is guaranteed to be 32 or 64,
        // the following process always succeeds.
        unsafe { Self::try_from(src).unwrap_unchecked() }
    }
}

#[cfg(test)]
/// HashMapリテラルを簡潔に記述するためのマクロ
///
/// # 例
///
/// ```ignore
/// let map = hashmap! {
///     "tid.dat" => vec![0u8; 10],
///     "tid_pos.dat" => vec![],
/// };
/// ```
macro_rules! hashmap {
    ( $($k:expr => $v:expr,)* ) => {
        {
            #[allow(unused_mut)]
            let mut h = hashbrown::HashMap::new();
            $(
                h.insert($k, $v);
            )*
            h
        }
    };
    ( $($k:expr => $v:expr),* ) => {
        hashmap![$( $k => $v, )*]
    };
}

#[cfg(test)]
pub(crate) use hashmap;
