use crate::domain::record::{FluidRecord, FluidType};
use crate::domain::report::{BalanceReport, VOLUME_UNIT};

pub struct BalanceService;

impl BalanceService {
    /// Partitions a record set by flow direction and sums the volumes.
    ///
    /// Pure and order-independent. Raw totals stay unrounded so they remain
    /// strictly additive across disjoint sets; only the net balance is
    /// rounded, at this top level. Malformed amounts (negative, NaN) flow
    /// through the sums unchecked.
    pub fn aggregate<'a, I>(records: I) -> BalanceReport
    where
        I: IntoIterator<Item = &'a FluidRecord>,
    {
        let mut total_in = 0.0;
        let mut total_out = 0.0;
        for record in records {
            match record.kind {
                FluidType::In => total_in += record.amount,
                FluidType::Out => total_out += record.amount,
            }
        }
        BalanceReport {
            total_in,
            total_out,
            balance: round2(total_in - total_out),
            unit: VOLUME_UNIT.into(),
        }
    }
}

pub(crate) fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(kind: FluidType, amount: f64) -> FluidRecord {
        FluidRecord::new(kind, "sys_water", amount)
    }

    #[test]
    fn empty_input_yields_all_zero_report() {
        let records: Vec<FluidRecord> = Vec::new();
        let report = BalanceService::aggregate(&records);
        assert_eq!(report, BalanceReport::zero());
        assert_eq!(report.unit, "mL");
    }

    #[test]
    fn partitions_by_direction() {
        let records = vec![
            record(FluidType::In, 500.0),
            record(FluidType::Out, 200.0),
            record(FluidType::In, 120.5),
        ];
        let report = BalanceService::aggregate(&records);
        assert_eq!(report.total_in, 620.5);
        assert_eq!(report.total_out, 200.0);
        assert_eq!(report.balance, 420.5);
    }

    #[test]
    fn raw_totals_are_additive_across_disjoint_sets() {
        let a = vec![record(FluidType::In, 0.1), record(FluidType::In, 0.2)];
        let b = vec![record(FluidType::Out, 0.3), record(FluidType::In, 0.4)];
        let whole: Vec<FluidRecord> = a.iter().chain(b.iter()).cloned().collect();

        let ra = BalanceService::aggregate(&a);
        let rb = BalanceService::aggregate(&b);
        let rw = BalanceService::aggregate(&whole);
        assert_eq!(rw.total_in, ra.total_in + rb.total_in);
        assert_eq!(rw.total_out, ra.total_out + rb.total_out);
    }

    #[test]
    fn ordering_does_not_matter() {
        let mut records = vec![
            record(FluidType::In, 1.0),
            record(FluidType::Out, 2.0),
            record(FluidType::In, 3.0),
        ];
        let forward = BalanceService::aggregate(&records);
        records.reverse();
        let backward = BalanceService::aggregate(&records);
        assert_eq!(forward, backward);
    }

    #[test]
    fn malformed_amounts_flow_through_unchecked() {
        let records = vec![record(FluidType::In, -50.0), record(FluidType::In, 100.0)];
        let report = BalanceService::aggregate(&records);
        assert_eq!(report.total_in, 50.0);
    }
}
