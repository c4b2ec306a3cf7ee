/// 送受信メッセージ（ペイロード + 末尾チェックサム）

use std::fmt;

use super::bit_utils::{parse_bits, BitSequence};
use super::checksum::{compute, ChecksumWidth, ChecksumWord};
use super::exceptions::{ChecksumWidthError, FletcherResult};

/// ペイロードの後ろに `width` ビットのチェックサムが続くメッセージ
///
/// 長さが幅以上であることは構築時に保証される。
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Message {
    bits: BitSequence,
    width: ChecksumWidth,
}

impl Message {
    /// 受信した文字列からメッセージを作成
    pub fn parse(raw: &str, width: ChecksumWidth) -> FletcherResult<Self> {
        let bits = parse_bits(raw)?;
        Ok(Self::from_bits(bits, width)?)
    }

    pub fn from_bits(bits: BitSequence, width: ChecksumWidth) -> Result<Self, ChecksumWidthError> {
        if bits.len() < width.bits() as usize {
            return Err(ChecksumWidthError::message_too_short(width.bits(), bits.len()));
        }
        Ok(Self { bits, width })
    }

    /// 送信側: ペイロードに計算したチェックサムを付加する
    pub fn encode(payload: &BitSequence, width: ChecksumWidth) -> Self {
        let checksum = compute(payload, width);
        Self {
            bits: payload.concat(checksum.bits()),
            width,
        }
    }

    /// (ペイロード, 受信チェックサム) に分割
    pub fn split(&self) -> (BitSequence, ChecksumWord) {
        let (payload, tail) = self.bits.split_at(self.bits.len() - self.width.bits() as usize);
        (payload, ChecksumWord::from_parts(tail, self.width))
    }

    pub fn bits(&self) -> &BitSequence {
        &self.bits
    }

    pub fn width(&self) -> ChecksumWidth {
        self.width
    }

    pub fn len(&self) -> usize {
        self.bits.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bits.is_empty()
    }
}

impl fmt::Display for Message {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.bits)
    }
}
