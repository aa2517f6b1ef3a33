//! Donations
//!
//! Completed donations are partitioned into fixed transparency buckets, and
//! the artisan-support bucket is further shared across the partner
//! beneficiary organisations. Amounts are reconciled so that each level sums
//! exactly to the amount being split, with the largest share absorbing any
//! rounding residue.

use std::fmt;

use decimal_percentage::Percentage;
use rust_decimal::Decimal;
use rusty_money::{Money, iso::Currency};
use thiserror::Error;

use crate::money::{AmountError, minor_units, round2};

/// Transparency bucket a donation is allocated into.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Bucket {
    /// Direct support for weaving artisans.
    ArtisanSupport,

    /// Raw materials: threads, dyes and looms.
    Materials,

    /// Training programmes for apprentice weavers.
    Training,

    /// Platform operating fee.
    PlatformFee,
}

impl Bucket {
    /// All buckets, ordered largest share first.
    pub const ALL: [Self; 4] = [
        Self::ArtisanSupport,
        Self::Materials,
        Self::Training,
        Self::PlatformFee,
    ];

    /// Share of the donation, in percent. Shares sum to 100.
    pub const fn share(self) -> u8 {
        match self {
            Self::ArtisanSupport => 70,
            Self::Materials => 15,
            Self::Training => 10,
            Self::PlatformFee => 5,
        }
    }

    /// Human-readable label for transparency statements.
    pub const fn label(self) -> &'static str {
        match self {
            Self::ArtisanSupport => "Artisan Support",
            Self::Materials => "Materials",
            Self::Training => "Training",
            Self::PlatformFee => "Platform Fee",
        }
    }
}

impl fmt::Display for Bucket {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// A partner organisation receiving a share of the artisan-support bucket.
#[derive(Debug, PartialEq, Eq)]
pub struct Beneficiary {
    /// Stable identifier used in transparency statements.
    pub id: &'static str,

    /// Display name.
    pub name: &'static str,

    /// Share of the artisan-support bucket, in percent.
    pub share: u8,
}

/// Beneficiaries of the artisan-support bucket, ordered largest share first.
/// Shares sum to 100.
pub static BENEFICIARIES: [Beneficiary; 4] = [
    Beneficiary {
        id: "cordillera-weavers-coop",
        name: "Cordillera Weavers Cooperative",
        share: 30,
    },
    Beneficiary {
        id: "abra-loom-builders",
        name: "Abra Loom Builders Guild",
        share: 25,
    },
    Beneficiary {
        id: "ifugao-fiber-growers",
        name: "Ifugao Fiber Growers Association",
        share: 25,
    },
    Beneficiary {
        id: "mountain-province-dyers",
        name: "Mountain Province Natural Dyers",
        share: 20,
    },
];

/// One bucket's share of a donation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BucketAllocation<'a> {
    /// Bucket the amount is allocated to.
    pub bucket: Bucket,

    /// Allocated amount.
    pub amount: Money<'a, Currency>,

    /// Fixed share of the donation, in percent.
    pub percentage: u8,
}

/// One beneficiary's share of the artisan-support bucket.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BeneficiaryAllocation<'a> {
    /// Receiving organisation.
    pub beneficiary: &'static Beneficiary,

    /// Allocated amount.
    pub amount: Money<'a, Currency>,

    /// Fixed share of the artisan-support bucket, in percent.
    pub percentage: u8,
}

/// Errors that can occur while allocating a donation.
#[derive(Debug, Error, PartialEq)]
pub enum AllocationError {
    /// The donation amount is non-positive or has more than two fraction
    /// digits.
    #[error("invalid donation amount: {0}")]
    InvalidAmount(Decimal),

    /// The donation amount cannot be represented in minor units.
    #[error(transparent)]
    Amount(#[from] AmountError),
}

/// Full transparency breakdown of a completed donation.
#[derive(Debug, Clone, PartialEq)]
pub struct DonationBreakdown<'a> {
    donation: Money<'a, Currency>,
    buckets: [BucketAllocation<'a>; 4],
    beneficiaries: [BeneficiaryAllocation<'a>; 4],
}

impl<'a> DonationBreakdown<'a> {
    /// The donated amount being broken down.
    #[must_use]
    pub fn donation(&self) -> Money<'a, Currency> {
        self.donation
    }

    /// Bucket allocations, ordered largest share first. Amounts sum exactly
    /// to the donation.
    #[must_use]
    pub fn buckets(&self) -> &[BucketAllocation<'a>; 4] {
        &self.buckets
    }

    /// Beneficiary allocations of the artisan-support bucket, ordered
    /// largest share first. Amounts sum exactly to that bucket.
    #[must_use]
    pub fn beneficiaries(&self) -> &[BeneficiaryAllocation<'a>; 4] {
        &self.beneficiaries
    }

    /// Looks up the allocation for a single bucket.
    pub fn bucket(&self, bucket: Bucket) -> Option<&BucketAllocation<'a>> {
        self.buckets.iter().find(|b| b.bucket == bucket)
    }
}

/// Allocates a completed donation across the transparency buckets and the
/// artisan-support beneficiaries.
///
/// Each share is rounded half-up independently, then the largest share
/// absorbs the residual so the parts sum exactly to the whole. Without that
/// reconciliation the displayed amounts could drift a cent from the donation,
/// a silent correctness bug rather than a surfaced error.
///
/// Pure and deterministic: the same amount always yields an identical
/// breakdown.
///
/// # Errors
///
/// Returns [`AllocationError::InvalidAmount`] if the amount is not positive
/// or carries more than two fraction digits.
pub fn allocate(
    amount: Decimal,
    currency: &Currency,
) -> Result<DonationBreakdown<'_>, AllocationError> {
    if amount <= Decimal::ZERO || round2(amount) != amount {
        return Err(AllocationError::InvalidAmount(amount));
    }

    let donation_minor = minor_units(amount)?;

    let [artisan, materials, training, platform] =
        split(donation_minor, amount, Bucket::ALL.map(Bucket::share))?;

    let buckets = [
        bucket_allocation(Bucket::ArtisanSupport, artisan, currency),
        bucket_allocation(Bucket::Materials, materials, currency),
        bucket_allocation(Bucket::Training, training, currency),
        bucket_allocation(Bucket::PlatformFee, platform, currency),
    ];

    // The beneficiary split starts from the reconciled artisan-support
    // amount, not from a fresh 70% of the donation.
    let artisan_amount = Decimal::new(artisan, 2);
    let shares = BENEFICIARIES.each_ref().map(|b| b.share);

    let [first, second, third, fourth] = split(artisan, artisan_amount, shares)?;
    let [coop, looms, fibers, dyers] = BENEFICIARIES.each_ref();

    let beneficiaries = [
        beneficiary_allocation(coop, first, currency),
        beneficiary_allocation(looms, second, currency),
        beneficiary_allocation(fibers, third, currency),
        beneficiary_allocation(dyers, fourth, currency),
    ];

    Ok(DonationBreakdown {
        donation: Money::from_minor(donation_minor, currency),
        buckets,
        beneficiaries,
    })
}

fn bucket_allocation(bucket: Bucket, minor: i64, currency: &Currency) -> BucketAllocation<'_> {
    BucketAllocation {
        bucket,
        amount: Money::from_minor(minor, currency),
        percentage: bucket.share(),
    }
}

fn beneficiary_allocation<'a>(
    beneficiary: &'static Beneficiary,
    minor: i64,
    currency: &'a Currency,
) -> BeneficiaryAllocation<'a> {
    BeneficiaryAllocation {
        beneficiary,
        amount: Money::from_minor(minor, currency),
        percentage: beneficiary.share,
    }
}

/// Splits `total_minor` across `shares`, rounding each part half-up and
/// letting the leading share absorb the rounding residual.
///
/// `amount` is the decimal value of `total_minor`; shares must be ordered
/// largest first and sum to 100.
fn split(
    total_minor: i64,
    amount: Decimal,
    shares: [u8; 4],
) -> Result<[i64; 4], AllocationError> {
    let mut minors = [0i64; 4];

    for (slot, share) in minors.iter_mut().zip(shares) {
        let part = Percentage::from(Decimal::new(i64::from(share), 2)) * amount;
        *slot = minor_units(round2(part))?;
    }

    let allocated: i64 = minors.iter().sum();

    if let Some(largest) = minors.first_mut() {
        *largest += total_minor - allocated;
    }

    Ok(minors)
}

#[cfg(test)]
mod tests {
    use rusty_money::iso::PHP;
    use testresult::TestResult;

    use super::*;

    fn bucket_minors(breakdown: &DonationBreakdown<'_>) -> Vec<i64> {
        breakdown
            .buckets()
            .iter()
            .map(|b| b.amount.to_minor_units())
            .collect()
    }

    fn beneficiary_minors(breakdown: &DonationBreakdown<'_>) -> Vec<i64> {
        breakdown
            .beneficiaries()
            .iter()
            .map(|b| b.amount.to_minor_units())
            .collect()
    }

    #[test]
    fn shares_sum_to_one_hundred() {
        let bucket_total: u32 = Bucket::ALL.iter().map(|b| u32::from(b.share())).sum();
        let beneficiary_total: u32 = BENEFICIARIES.iter().map(|b| u32::from(b.share)).sum();

        assert_eq!(bucket_total, 100);
        assert_eq!(beneficiary_total, 100);
    }

    #[test]
    fn allocates_round_donation_without_residual() -> TestResult {
        let breakdown = allocate(Decimal::new(1000_00, 2), PHP)?;

        assert_eq!(bucket_minors(&breakdown), vec![70_000, 15_000, 10_000, 5_000]);
        assert_eq!(
            beneficiary_minors(&breakdown),
            vec![21_000, 17_500, 17_500, 14_000]
        );

        Ok(())
    }

    #[test]
    fn positive_residual_goes_to_artisan_support() -> TestResult {
        // 0.02: shares round to 0.01/0.00/0.00/0.00, leaving 0.01 to absorb.
        let breakdown = allocate(Decimal::new(2, 2), PHP)?;

        assert_eq!(bucket_minors(&breakdown), vec![2, 0, 0, 0]);

        Ok(())
    }

    #[test]
    fn negative_residual_is_taken_from_largest_beneficiary() -> TestResult {
        // Artisan support of 0.03 rounds to 0.01 for each beneficiary,
        // overshooting by 0.01; the 30% share gives it back.
        let breakdown = allocate(Decimal::new(3, 2), PHP)?;

        assert_eq!(bucket_minors(&breakdown), vec![3, 0, 0, 0]);
        assert_eq!(beneficiary_minors(&breakdown), vec![0, 1, 1, 1]);

        Ok(())
    }

    #[test]
    fn buckets_always_sum_to_donation() -> TestResult {
        let amounts = [1, 2, 3, 5, 7, 33_33, 33_34, 99_99, 123_45, 999_99, 1_234_56];

        for minor in amounts {
            let amount = Decimal::new(minor, 2);
            let breakdown = allocate(amount, PHP)?;

            let bucket_sum: i64 = bucket_minors(&breakdown).iter().sum();
            assert_eq!(bucket_sum, minor, "buckets must sum to {amount}");

            let artisan = breakdown
                .bucket(Bucket::ArtisanSupport)
                .map(|b| b.amount.to_minor_units())
                .unwrap_or_default();

            let beneficiary_sum: i64 = beneficiary_minors(&breakdown).iter().sum();
            assert_eq!(
                beneficiary_sum, artisan,
                "beneficiaries must sum to the artisan-support bucket for {amount}"
            );
        }

        Ok(())
    }

    #[test]
    fn allocation_is_deterministic() -> TestResult {
        let amount = Decimal::new(123_45, 2);

        assert_eq!(allocate(amount, PHP)?, allocate(amount, PHP)?);

        Ok(())
    }

    #[test]
    fn percentages_are_reported_alongside_amounts() -> TestResult {
        let breakdown = allocate(Decimal::new(1000_00, 2), PHP)?;

        let bucket_percentages: Vec<u8> =
            breakdown.buckets().iter().map(|b| b.percentage).collect();
        let beneficiary_percentages: Vec<u8> = breakdown
            .beneficiaries()
            .iter()
            .map(|b| b.percentage)
            .collect();

        assert_eq!(bucket_percentages, vec![70, 15, 10, 5]);
        assert_eq!(beneficiary_percentages, vec![30, 25, 25, 20]);

        Ok(())
    }

    #[test]
    fn non_positive_amounts_are_rejected() {
        assert_eq!(
            allocate(Decimal::ZERO, PHP),
            Err(AllocationError::InvalidAmount(Decimal::ZERO))
        );

        assert_eq!(
            allocate(Decimal::new(-5_00, 2), PHP),
            Err(AllocationError::InvalidAmount(Decimal::new(-5_00, 2)))
        );
    }

    #[test]
    fn sub_cent_amounts_are_rejected() {
        let amount = Decimal::new(10_005, 3);

        assert_eq!(
            allocate(amount, PHP),
            Err(AllocationError::InvalidAmount(amount))
        );
    }
}
