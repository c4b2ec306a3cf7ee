/// ビット操作ユーティリティ
/// ビット列型 BitSequence と入力検証

use std::fmt;
use std::str::FromStr;

use bitvec::prelude::*;

use super::exceptions::InvalidSymbolError;

/// 入力文字列が '0' と '1' のみで構成されているか検証する
///
/// 空文字列は不正とする。全て '0'、全て '1' の文字列は正当。
pub fn validate(raw: &str) -> bool {
    !raw.is_empty() && raw.chars().all(|c| c == '0' || c == '1')
}

/// 文字列をビット列に変換する
///
/// 最初に見つかった不正文字の位置（文字単位）を返す。
pub fn parse_bits(raw: &str) -> Result<BitSequence, InvalidSymbolError> {
    if raw.is_empty() {
        return Err(InvalidSymbolError::Empty);
    }

    let mut bits = BitVec::<u8, Msb0>::with_capacity(raw.len());
    for (position, symbol) in raw.chars().enumerate() {
        match symbol {
            '0' => bits.push(false),
            '1' => bits.push(true),
            _ => return Err(InvalidSymbolError::symbol(position, symbol)),
        }
    }

    Ok(BitSequence { bits })
}

/// 順序付きビット列
///
/// 送受信されるメッセージのペイロードやチェックサム部分を表す。
/// 先頭ビットが最上位（文字列表現の左端）。
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct BitSequence {
    bits: BitVec<u8, Msb0>,
}

impl BitSequence {
    /// 空のビット列を作成
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.bits.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bits.is_empty()
    }

    /// 各ビットを 0 / 1 の値として順に返す
    pub fn iter(&self) -> impl Iterator<Item = u8> + '_ {
        self.bits.iter().by_vals().map(u8::from)
    }

    pub fn as_bitslice(&self) -> &BitSlice<u8, Msb0> {
        &self.bits
    }

    /// `mid` の位置で前後に分割する（`mid` は長さ以下であること）
    pub fn split_at(&self, mid: usize) -> (BitSequence, BitSequence) {
        let (head, tail) = self.bits.split_at(mid.min(self.bits.len()));
        (
            BitSequence { bits: head.to_bitvec() },
            BitSequence { bits: tail.to_bitvec() },
        )
    }

    /// 後ろに別のビット列を連結した新しいビット列を返す
    pub fn concat(&self, other: &BitSequence) -> BitSequence {
        let mut bits = self.bits.clone();
        bits.extend_from_bitslice(other.bits.as_bitslice());
        BitSequence { bits }
    }

    /// `index` のビットを反転したコピーを返す。範囲外なら None
    pub fn flipped(&self, index: usize) -> Option<BitSequence> {
        if index >= self.bits.len() {
            return None;
        }
        let mut bits = self.bits.clone();
        let current = bits[index];
        bits.set(index, !current);
        Some(BitSequence { bits })
    }

    /// ビット列を MSB 先頭の符号なし整数として読む（128 ビットを超える部分は上位から切り捨て）
    pub fn to_u128(&self) -> u128 {
        self.bits
            .iter()
            .by_vals()
            .fold(0u128, |acc, bit| (acc << 1) | u128::from(bit))
    }
}

impl FromStr for BitSequence {
    type Err = InvalidSymbolError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse_bits(s)
    }
}

impl fmt::Display for BitSequence {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for bit in self.bits.iter().by_vals() {
            f.write_str(if bit { "1" } else { "0" })?;
        }
        Ok(())
    }
}

impl FromIterator<bool> for BitSequence {
    fn from_iter<I: IntoIterator<Item = bool>>(iter: I) -> Self {
        Self { bits: iter.into_iter().collect() }
    }
}
