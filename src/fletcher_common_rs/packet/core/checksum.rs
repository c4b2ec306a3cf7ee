/// Fletcher チェックサムの計算・検証機能
/// ビット単位で2つの剰余和を累積し、固定幅のチェックサム語にまとめる

use std::fmt;

use log::trace;

use super::bit_utils::BitSequence;
use super::exceptions::{ChecksumError, ChecksumWidthError};
use super::message::Message;

/// 累積和の法（幅に関係なく固定）
pub const MODULUS: u32 = 255;

/// チェックサム幅の既定値
pub const DEFAULT_WIDTH: u32 = 16;

/// 累積和が占める最大ビット数（MODULUS 未満の値）
const SUM_BITS: usize = 8;

/// チェックサム幅（ビット）
///
/// 上位半分に sum2、下位半分に sum1 を置くため偶数のみ。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ChecksumWidth(u32);

impl ChecksumWidth {
    /// 幅を検証して作成（2 以上の偶数）
    pub fn new(bits: u32) -> Result<Self, ChecksumWidthError> {
        if bits == 0 || bits % 2 != 0 {
            return Err(ChecksumWidthError::Unsupported { width: bits });
        }
        Ok(Self(bits))
    }

    pub fn bits(self) -> u32 {
        self.0
    }

    /// 半分の幅（sum2 のシフト量）
    pub fn half(self) -> u32 {
        self.0 / 2
    }
}

impl Default for ChecksumWidth {
    fn default() -> Self {
        Self(DEFAULT_WIDTH)
    }
}

impl TryFrom<u32> for ChecksumWidth {
    type Error = ChecksumWidthError;

    fn try_from(bits: u32) -> Result<Self, Self::Error> {
        Self::new(bits)
    }
}

impl fmt::Display for ChecksumWidth {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// 固定幅のチェックサム語
///
/// 幅に上限はなく、ビット列として保持する。比較はビット単位の完全一致。
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChecksumWord {
    bits: BitSequence,
    width: ChecksumWidth,
}

impl ChecksumWord {
    /// 2つの累積和を詰めてチェックサム語を作る
    ///
    /// `((sum2 << half) | sum1) & mask(width)` をビットごとに求める。
    /// 幅が狭いと sum1 の上位ビットが sum2 の領域に重なり OR される。
    pub fn pack(sum1: u32, sum2: u32, width: ChecksumWidth) -> Self {
        let half = width.half() as usize;
        let bits = (0..width.bits() as usize)
            .rev()
            .map(|i| {
                let low = i < SUM_BITS && (sum1 >> i) & 1 == 1;
                let high = i >= half && i - half < SUM_BITS && (sum2 >> (i - half)) & 1 == 1;
                low || high
            })
            .collect();
        Self { bits, width }
    }

    /// 受信したチェックサム部分から作成（長さが幅と一致することは呼び出し側で保証）
    pub(super) fn from_parts(bits: BitSequence, width: ChecksumWidth) -> Self {
        debug_assert_eq!(bits.len(), width.bits() as usize);
        Self { bits, width }
    }

    /// 下位 128 ビットの値
    pub fn value(&self) -> u128 {
        self.bits.to_u128()
    }

    pub fn width(&self) -> ChecksumWidth {
        self.width
    }

    /// 下位半分（sum1 の位置）の値
    pub fn low_half(&self) -> u128 {
        self.halves().1.to_u128()
    }

    /// 上位半分（sum2 の位置）の値
    pub fn high_half(&self) -> u128 {
        self.halves().0.to_u128()
    }

    pub fn bits(&self) -> &BitSequence {
        &self.bits
    }

    fn halves(&self) -> (BitSequence, BitSequence) {
        self.bits.split_at(self.width.half() as usize)
    }
}

impl fmt::Display for ChecksumWord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.bits)
    }
}

/// 逐次更新できる累積器
///
/// チャンクに分けて与えても一括計算と同じ結果になる。
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FletcherAccumulator {
    sum1: u32,
    sum2: u32,
}

impl FletcherAccumulator {
    pub fn new() -> Self {
        Self::default()
    }

    /// 1ビット分更新
    pub fn update(&mut self, bit: bool) {
        self.sum1 = (self.sum1 + u32::from(bit)) % MODULUS;
        self.sum2 = (self.sum2 + self.sum1) % MODULUS;
    }

    pub fn update_bits(&mut self, bits: &BitSequence) {
        for bit in bits.as_bitslice().iter().by_vals() {
            self.update(bit);
        }
    }

    /// (sum1, sum2)
    pub fn sums(&self) -> (u32, u32) {
        (self.sum1, self.sum2)
    }

    pub fn finish(&self, width: ChecksumWidth) -> ChecksumWord {
        ChecksumWord::pack(self.sum1, self.sum2, width)
    }

    pub fn reset(&mut self) {
        *self = Self::default();
    }
}

/// ペイロードのチェックサムを計算する
///
/// Args:
///     payload: チェックサム計算対象のビット列（チェックサム部分を除く）
///     width: チェックサム幅
///
/// Returns:
///     幅 `width` のチェックサム語（空のペイロードは全て 0）
pub fn compute(payload: &BitSequence, width: ChecksumWidth) -> ChecksumWord {
    let mut acc = FletcherAccumulator::new();
    acc.update_bits(payload);

    let (sum1, sum2) = acc.sums();
    trace!("fletcher sums over {} bits: sum1={} sum2={}", payload.len(), sum1, sum2);

    acc.finish(width)
}

/// 受信メッセージの検証結果
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VerifyReport {
    /// 計算値と受信値が完全一致したか
    pub valid: bool,
    pub computed: ChecksumWord,
    pub claimed: ChecksumWord,
    pub payload: BitSequence,
}

impl VerifyReport {
    /// 不一致を ChecksumError に変換する。一致していればペイロードを返す
    pub fn into_result(self) -> Result<BitSequence, ChecksumError> {
        if self.valid {
            Ok(self.payload)
        } else {
            Err(ChecksumError::Mismatch {
                computed: self.computed,
                claimed: self.claimed,
            })
        }
    }
}

/// 受信メッセージを検証する
///
/// メッセージは構築時に幅以上の長さが保証されている。
/// 不一致はエラーではなく `valid == false` として返す。
pub fn verify(message: &Message) -> VerifyReport {
    let (payload, claimed) = message.split();
    let computed = compute(&payload, message.width());

    VerifyReport {
        valid: computed == claimed,
        computed,
        claimed,
        payload,
    }
}

/// 幅を保持したチェックサムエンジン
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FletcherChecksum {
    width: ChecksumWidth,
}

impl FletcherChecksum {
    pub fn new(width: ChecksumWidth) -> Self {
        Self { width }
    }

    pub fn width(&self) -> ChecksumWidth {
        self.width
    }

    pub fn compute(&self, payload: &BitSequence) -> ChecksumWord {
        compute(payload, self.width)
    }

    /// 末尾にチェックサムを含むビット列を検証する
    ///
    /// 幅より短い場合は比較を行わずエラーを返す。
    pub fn verify(&self, message: BitSequence) -> Result<VerifyReport, ChecksumWidthError> {
        let message = Message::from_bits(message, self.width)?;
        Ok(verify(&message))
    }

    /// 送信側: ペイロードにチェックサムを付加したメッセージを作る
    pub fn encode(&self, payload: &BitSequence) -> Message {
        Message::encode(payload, self.width)
    }
}
