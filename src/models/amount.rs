use crate::consts::{MAX_SUPPLY, UNIT_SCALE};
use crate::errors::{AmountError, AppResult};
use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt::{Display, Formatter};
use std::str::FromStr;

/// Decimal denominations of the iota.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Unit {
    Iota,
    Kilo,
    Mega,
    Giga,
    Tera,
    Peta,
}

impl Unit {
    #[inline]
    pub fn exponent(self) -> u32 {
        match self {
            Unit::Iota => 0,
            Unit::Kilo => 3,
            Unit::Mega => 6,
            Unit::Giga => 9,
            Unit::Tera => 12,
            Unit::Peta => 15,
        }
    }

    #[inline]
    fn factor(self) -> Decimal {
        Decimal::from(10_i64.pow(self.exponent()))
    }
}

/// A whole number of iotas, always within `-MAX_SUPPLY..=MAX_SUPPLY`.
///
/// Backed by an exact decimal; every arithmetic operation builds a new
/// value and re-checks the supply cap, so an out-of-range intermediate
/// fails where it happens.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Amount(Decimal);

impl Amount {
    #[inline]
    pub fn zero() -> Self {
        Amount(Decimal::ZERO)
    }

    pub fn new(iotas: i64) -> AppResult<Amount> {
        Ok(Amount::from_decimal(Decimal::from(iotas))?)
    }

    fn from_decimal(value: Decimal) -> Result<Amount, AmountError> {
        if !value.fract().is_zero() {
            return Err(AmountError::NotIntegral(value.to_string()));
        }
        let value = value.normalize();
        if value.abs() > Decimal::from(MAX_SUPPLY) {
            return Err(AmountError::OutOfRange(value.to_string()));
        }
        Ok(Amount(value))
    }

    pub fn plus(&self, other: &Amount) -> AppResult<Amount> {
        let sum = self.0.checked_add(other.0).ok_or(AmountError::Overflow)?;
        Ok(Amount::from_decimal(sum)?)
    }

    pub fn minus(&self, other: &Amount) -> AppResult<Amount> {
        let diff = self.0.checked_sub(other.0).ok_or(AmountError::Overflow)?;
        Ok(Amount::from_decimal(diff)?)
    }

    pub fn multiply_by(&self, factor: i64) -> AppResult<Amount> {
        let product = self
            .0
            .checked_mul(Decimal::from(factor))
            .ok_or(AmountError::Overflow)?;
        Ok(Amount::from_decimal(product)?)
    }

    /// Integer division, truncating toward zero.
    pub fn divide_by(&self, divisor: i64) -> AppResult<Amount> {
        if divisor == 0 {
            return Err(AmountError::DivisionByZero.into());
        }
        let divisor = Decimal::from(divisor);
        // subtracting the remainder first keeps the quotient exact
        let rem = self.0.checked_rem(divisor).ok_or(AmountError::Overflow)?;
        let quotient = (self.0 - rem)
            .checked_div(divisor)
            .ok_or(AmountError::Overflow)?;
        Ok(Amount::from_decimal(quotient)?)
    }

    /// Sums amounts, failing as soon as a partial sum leaves the supply range.
    pub fn total<'a>(amounts: impl IntoIterator<Item = &'a Amount>) -> AppResult<Amount> {
        amounts
            .into_iter()
            .try_fold(Amount::zero(), |acc, a| acc.plus(a))
    }

    #[inline]
    pub fn is_negative(&self) -> bool {
        self.0.is_sign_negative() && !self.0.is_zero()
    }

    #[inline]
    pub fn is_positive(&self) -> bool {
        self.0.is_sign_positive() && !self.0.is_zero()
    }

    #[inline]
    pub fn is_zero(&self) -> bool {
        self.0.is_zero()
    }

    /// Parses `value` expressed in `unit`. Digits below one iota are dropped.
    pub fn from_unit(value: &str, unit: Unit) -> AppResult<Amount> {
        let parsed = Decimal::from_str(value.trim())
            .map_err(|_| AmountError::Malformed(value.to_string()))?;
        let iotas = parsed
            .checked_mul(unit.factor())
            .ok_or(AmountError::Overflow)?
            .trunc();
        Ok(Amount::from_decimal(iotas)?)
    }

    /// The amount expressed in `unit`, truncated to 15 fractional digits.
    pub fn to_unit(&self, unit: Unit) -> Decimal {
        (self.0 / unit.factor())
            .round_dp_with_strategy(UNIT_SCALE, RoundingStrategy::ToZero)
            .normalize()
    }

    pub fn from_kilo_iota(value: &str) -> AppResult<Amount> {
        Amount::from_unit(value, Unit::Kilo)
    }

    pub fn from_mega_iota(value: &str) -> AppResult<Amount> {
        Amount::from_unit(value, Unit::Mega)
    }

    pub fn from_giga_iota(value: &str) -> AppResult<Amount> {
        Amount::from_unit(value, Unit::Giga)
    }

    pub fn from_tera_iota(value: &str) -> AppResult<Amount> {
        Amount::from_unit(value, Unit::Tera)
    }

    pub fn from_peta_iota(value: &str) -> AppResult<Amount> {
        Amount::from_unit(value, Unit::Peta)
    }

    pub fn kilo_iota(&self) -> String {
        self.to_unit(Unit::Kilo).to_string()
    }

    pub fn mega_iota(&self) -> String {
        self.to_unit(Unit::Mega).to_string()
    }

    pub fn giga_iota(&self) -> String {
        self.to_unit(Unit::Giga).to_string()
    }

    pub fn tera_iota(&self) -> String {
        self.to_unit(Unit::Tera).to_string()
    }

    pub fn peta_iota(&self) -> String {
        self.to_unit(Unit::Peta).to_string()
    }
}

impl FromStr for Amount {
    type Err = AmountError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let parsed =
            Decimal::from_str(s.trim()).map_err(|_| AmountError::Malformed(s.to_string()))?;
        Amount::from_decimal(parsed)
    }
}

impl Display for Amount {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl Serialize for Amount {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.collect_str(&self.0)
    }
}

/// Nodes report balances as strings; plain integers are accepted too.
#[derive(Deserialize)]
#[serde(untagged)]
enum RawAmount {
    Text(String),
    Integer(i64),
}

impl<'de> Deserialize<'de> for Amount {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let parsed = match RawAmount::deserialize(deserializer)? {
            RawAmount::Text(s) => Amount::from_str(&s),
            RawAmount::Integer(i) => Amount::from_decimal(Decimal::from(i)),
        };
        parsed.map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::AppErrors;
    use proptest::prelude::*;

    fn amt(s: &str) -> Amount {
        Amount::from_str(s).expect("valid amount")
    }

    #[test]
    fn string_form_round_trips_in_canonical_decimal() {
        for s in ["0", "1", "-1", "42", "-2779530283277761", "2779530283277761"] {
            assert_eq!(amt(s).to_string(), s);
        }
        assert_eq!(amt("007").to_string(), "7");
        assert_eq!(amt("-0").to_string(), "0");
        assert_eq!(amt("12.000").to_string(), "12");
    }

    #[test]
    fn construction_beyond_supply_cap_fails() {
        // act
        let above = Amount::from_str("2779530283277762");
        let below = Amount::new(-MAX_SUPPLY - 1);

        // assert
        assert!(matches!(above, Err(AmountError::OutOfRange(_))));
        assert!(matches!(
            below,
            Err(AppErrors::InvalidAmount(AmountError::OutOfRange(_)))
        ));
    }

    #[test]
    fn fractional_and_garbage_input_is_rejected() {
        assert!(matches!(
            Amount::from_str("1.5"),
            Err(AmountError::NotIntegral(_))
        ));
        assert!(matches!(
            Amount::from_str("ten"),
            Err(AmountError::Malformed(_))
        ));
    }

    #[test]
    fn plus_then_minus_restores_original() {
        let a = amt("123456789");
        let b = amt("-987654321");

        let back = a.plus(&b).unwrap().minus(&b).unwrap();

        assert_eq!(back, a);
    }

    #[test]
    fn overflowing_sum_fails_at_the_point_it_occurs() {
        let max = Amount::new(MAX_SUPPLY).unwrap();

        let res = max.plus(&amt("1"));

        assert!(matches!(
            res,
            Err(AppErrors::InvalidAmount(AmountError::OutOfRange(_)))
        ));
    }

    #[test]
    fn multiply_checks_supply_cap() {
        assert_eq!(amt("21").multiply_by(-3).unwrap(), amt("-63"));
        assert!(amt("2779530283277761").multiply_by(2).is_err());
        assert!(amt("2779530283277761").multiply_by(i64::MAX).is_err());
    }

    #[test]
    fn divide_truncates_toward_zero() {
        assert_eq!(amt("7").divide_by(2).unwrap(), amt("3"));
        assert_eq!(amt("-7").divide_by(2).unwrap(), amt("-3"));
        assert_eq!(amt("7").divide_by(-2).unwrap(), amt("-3"));
        assert_eq!(amt("2779530283277761").divide_by(3).unwrap(), amt("926510094425920"));
        assert!(matches!(
            amt("1").divide_by(0),
            Err(AppErrors::InvalidAmount(AmountError::DivisionByZero))
        ));
    }

    #[test]
    fn ordering_and_sign_predicates() {
        let neg = amt("-5");
        let zero = Amount::zero();
        let pos = amt("5");

        assert!(neg.lt(&zero) && zero.lt(&pos));
        assert!(pos.gt(&neg) && pos.ge(&pos) && neg.le(&neg));
        assert!(pos.ne(&neg) && zero.eq(&amt("0")));
        assert!(neg.is_negative() && !neg.is_positive() && !neg.is_zero());
        assert!(pos.is_positive() && zero.is_zero() && !zero.is_negative());
    }

    #[test]
    fn kilo_iota_round_trips() {
        let a = Amount::from_kilo_iota("5").unwrap();

        assert_eq!(a, amt("5000"));
        assert_eq!(a.kilo_iota(), "5");
    }

    #[test]
    fn unit_conversions_scale_by_powers_of_ten() {
        let max = Amount::new(MAX_SUPPLY).unwrap();

        assert_eq!(max.peta_iota(), "2.779530283277761");
        assert_eq!(max.tera_iota(), "2779.530283277761");
        assert_eq!(amt("1500").kilo_iota(), "1.5");
        assert_eq!(amt("-2500000").mega_iota(), "-2.5");
        assert_eq!(Amount::from_giga_iota("1.5").unwrap(), amt("1500000000"));
        assert_eq!(Amount::from_peta_iota("2.779530283277761").unwrap(), max);
        assert!(Amount::from_peta_iota("3").is_err());
    }

    #[test]
    fn sub_iota_digits_are_dropped_when_scaling_up() {
        assert_eq!(Amount::from_kilo_iota("0.0019").unwrap(), amt("1"));
        assert_eq!(Amount::from_kilo_iota("-0.0019").unwrap(), amt("-1"));
    }

    #[test]
    fn total_sums_or_fails() {
        let parts = [amt("1"), amt("2"), amt("3")];
        assert_eq!(Amount::total(&parts).unwrap(), amt("6"));

        let too_much = [Amount::new(MAX_SUPPLY).unwrap(), amt("1")];
        assert!(Amount::total(&too_much).is_err());
    }

    #[test]
    fn serde_uses_decimal_strings() {
        let json = serde_json::to_string(&amt("-42")).unwrap();
        assert_eq!(json, "\"-42\"");

        let from_text: Amount = serde_json::from_str("\"100\"").unwrap();
        let from_int: Amount = serde_json::from_str("100").unwrap();
        assert_eq!(from_text, from_int);

        assert!(serde_json::from_str::<Amount>("\"99999999999999999\"").is_err());
    }

    fn in_supply() -> impl Strategy<Value = i64> {
        -MAX_SUPPLY..=MAX_SUPPLY
    }

    proptest! {
        #[test]
        fn any_in_range_string_round_trips(v in in_supply()) {
            let s = v.to_string();
            prop_assert_eq!(amt(&s).to_string(), s);
        }

        #[test]
        fn plus_then_minus_restores_any_pair(a in in_supply(), b in in_supply()) {
            prop_assume!((a + b).abs() <= MAX_SUPPLY);
            let a = Amount::new(a).unwrap();
            let b = Amount::new(b).unwrap();

            let back = a.plus(&b).unwrap().minus(&b).unwrap();

            prop_assert_eq!(back, a);
        }

        #[test]
        fn every_unit_round_trips(v in in_supply()) {
            let a = Amount::new(v).unwrap();

            prop_assert_eq!(Amount::from_kilo_iota(&a.kilo_iota()).unwrap(), a);
            prop_assert_eq!(Amount::from_mega_iota(&a.mega_iota()).unwrap(), a);
            prop_assert_eq!(Amount::from_giga_iota(&a.giga_iota()).unwrap(), a);
            prop_assert_eq!(Amount::from_tera_iota(&a.tera_iota()).unwrap(), a);
            prop_assert_eq!(Amount::from_peta_iota(&a.peta_iota()).unwrap(), a);
        }
    }
}
