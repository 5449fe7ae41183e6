use crate::domain::receipt::Receipt;
use crate::error::Result;
use std::io::Write;

/// Writes a receipt as CSV rows of `item, schedule, amount`.
///
/// The institution, student and payment method head the receipt. Course lines
/// follow in selection order with their slot hours, then the total, any
/// applied discounts and the final amount. Amounts are rounded to two places.
pub struct ReceiptWriter<W: Write> {
    writer: csv::Writer<W>,
}

impl<W: Write> ReceiptWriter<W> {
    pub fn new(sink: W) -> Self {
        Self {
            writer: csv::Writer::from_writer(sink),
        }
    }

    pub fn write_receipt(&mut self, receipt: &Receipt) -> Result<()> {
        self.writer
            .write_record([receipt.header.institution.as_str(), "", ""])?;
        self.writer
            .write_record([receipt.header.motto.as_str(), "", ""])?;
        self.writer
            .write_record(["Student", "", receipt.student.as_str()])?;
        self.writer
            .write_record(["Payment Method", "", receipt.method.code()])?;

        self.writer.write_record(["item", "schedule", "amount"])?;
        for line in &receipt.lines {
            self.writer.write_record([
                line.course.name(),
                line.schedule.label().as_str(),
                line.fee.to_string().as_str(),
            ])?;
        }

        self.writer
            .write_record(["Total", "", receipt.base_total.to_string().as_str()])?;
        if let Some(discount) = receipt.referral_discount {
            self.writer
                .write_record(["Referral Discount", "", format!("-{discount}").as_str()])?;
        }
        if let Some(discount) = receipt.method_discount {
            self.writer
                .write_record(["Payment Method Discount", "", format!("-{discount}").as_str()])?;
        }
        self.writer
            .write_record(["FINAL TOTAL", "", receipt.final_total.to_string().as_str()])?;

        self.writer.flush()?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::catalog::{Course, Schedule};
    use crate::domain::money::Money;
    use crate::domain::payment::PaymentMethod;
    use crate::domain::receipt::{ReceiptHeader, ReceiptLine};
    use rust_decimal_macros::dec;

    #[test]
    fn test_write_receipt() {
        let receipt = Receipt {
            header: ReceiptHeader {
                institution: "Computer Online Education Centre".into(),
                motto: "The great aim of education is not knowledge, but action".into(),
            },
            student: "Ada".into(),
            method: PaymentMethod::Upi,
            lines: vec![ReceiptLine {
                course: Course::GraphicDesign,
                schedule: Schedule::Morning,
                fee: Money::new(dec!(3000)),
            }],
            base_total: Money::new(dec!(3000)),
            referral_discount: None,
            method_discount: Some(Money::new(dec!(90))),
            final_total: Money::new(dec!(2910)),
        };

        let mut buf = Vec::new();
        ReceiptWriter::new(&mut buf).write_receipt(&receipt).unwrap();
        let out = String::from_utf8(buf).unwrap();

        assert_eq!(
            out,
            "Computer Online Education Centre,,\n\
             \"The great aim of education is not knowledge, but action\",,\n\
             Student,,Ada\n\
             Payment Method,,UPI\n\
             item,schedule,amount\n\
             Graphic Design,Morning (10AM - 12PM),3000.00\n\
             Total,,3000.00\n\
             Payment Method Discount,,-90.00\n\
             FINAL TOTAL,,2910.00\n"
        );
    }
}
