use crate::domain::deal::Deal;
use crate::error::Result;
use rust_decimal::Decimal;
use serde::Serialize;
use std::io::Write;

/// One row of the deal report.
#[derive(Debug, Serialize)]
struct DealRecord<'a> {
    id: String,
    brand: &'a str,
    influencer: &'a str,
    status: &'static str,
    payment_status: &'static str,
    total_amount: Decimal,
    counter_offer: Option<Decimal>,
    content_published: bool,
    payment_released: bool,
}

impl<'a> From<&'a Deal> for DealRecord<'a> {
    fn from(deal: &'a Deal) -> Self {
        Self {
            id: deal.id.to_string(),
            brand: &deal.brand_id,
            influencer: deal.influencer_id().unwrap_or_default(),
            status: deal.status.as_str(),
            payment_status: deal.payment_status.as_str(),
            total_amount: deal.total_amount.normalize(),
            counter_offer: deal.counter_offer().map(|c| c.normalize()),
            content_published: deal.content_published,
            payment_released: deal.payment_released,
        }
    }
}

/// Writes a CSV report of deals to any `Write` sink (e.g. Stdout).
pub struct DealWriter<W: Write> {
    writer: csv::Writer<W>,
}

impl<W: Write> DealWriter<W> {
    pub fn new(sink: W) -> Self {
        Self {
            writer: csv::Writer::from_writer(sink),
        }
    }

    /// Writes the header followed by one row per deal, then flushes.
    ///
    /// The header is written even when `deals` is empty.
    pub fn write_deals(&mut self, deals: &[Deal]) -> Result<()> {
        if deals.is_empty() {
            self.writer.write_record([
                "id",
                "brand",
                "influencer",
                "status",
                "payment_status",
                "total_amount",
                "counter_offer",
                "content_published",
                "payment_released",
            ])?;
        }
        for deal in deals {
            self.writer.serialize(DealRecord::from(deal))?;
        }
        self.writer.flush()?;
        Ok(())
    }
}
