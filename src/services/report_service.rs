// src/services/report_service.rs

use std::collections::BTreeMap;

use chrono::{Days, FixedOffset, NaiveDate};
use rust_decimal::Decimal;
use sqlx::PgConnection;
use uuid::Uuid;

use crate::{
    common::{
        error::AppError,
        time::{ensure_daily_span, local_date, local_day_range, local_today},
    },
    db::{AppointmentRepository, OrderRepository},
    models::{
        appointment::SaleKind,
        report::{DailyRevenue, DashboardSummary, RealizedAppointment, RealizedOrder, RevenueSummary},
    },
};

/// Soma incremental do faturamento realizado.
#[derive(Debug, Default, Clone)]
struct RevenueAccumulator {
    services_total: Decimal,
    products_total: Decimal,
    appointments_count: i64,
    orders_count: i64,
}

impl RevenueAccumulator {
    fn add_appointment(&mut self, appointment: &RealizedAppointment) {
        let value = appointment.realized_value();
        match SaleKind::classify(appointment.origin, appointment.service_id) {
            SaleKind::Service => self.services_total += value,
            SaleKind::Product => self.products_total += value,
        }
        self.appointments_count += 1;
    }

    // Pedidos da vitrine são sempre venda de produto
    fn add_order(&mut self, order: &RealizedOrder) {
        self.products_total += order.total;
        self.orders_count += 1;
    }

    fn finish(self) -> RevenueSummary {
        let realized_total = self.services_total + self.products_total;
        let transactions_count = self.appointments_count + self.orders_count;
        let average_ticket = if transactions_count == 0 {
            Decimal::ZERO
        } else {
            realized_total / Decimal::from(transactions_count)
        };

        RevenueSummary {
            services_total: self.services_total,
            products_total: self.products_total,
            realized_total,
            appointments_count: self.appointments_count,
            orders_count: self.orders_count,
            transactions_count,
            average_ticket,
        }
    }
}

/// Consolida agendamentos concluídos e pedidos realizados do período.
pub fn summarize_revenue(
    appointments: &[RealizedAppointment],
    orders: &[RealizedOrder],
) -> RevenueSummary {
    let mut acc = RevenueAccumulator::default();
    appointments.iter().for_each(|a| acc.add_appointment(a));
    orders.iter().for_each(|o| acc.add_order(o));
    acc.finish()
}

/// Mesma soma, separada por dia local. Dias sem movimento entram zerados.
pub fn daily_revenue(
    appointments: &[RealizedAppointment],
    orders: &[RealizedOrder],
    start: NaiveDate,
    end: NaiveDate,
    offset: FixedOffset,
) -> Result<Vec<DailyRevenue>, AppError> {
    ensure_daily_span(start, end)?;

    let mut days: BTreeMap<NaiveDate, RevenueAccumulator> = BTreeMap::new();

    let mut day = start;
    while day <= end {
        days.insert(day, RevenueAccumulator::default());
        match day.checked_add_days(Days::new(1)) {
            Some(next) => day = next,
            None => break,
        }
    }

    for appointment in appointments {
        if let Some(acc) = days.get_mut(&local_date(appointment.concluded_at, offset)) {
            acc.add_appointment(appointment);
        }
    }
    for order in orders {
        if let Some(acc) = days.get_mut(&local_date(order.created_at, offset)) {
            acc.add_order(order);
        }
    }

    Ok(days
        .into_iter()
        .map(|(date, acc)| DailyRevenue { date, summary: acc.finish() })
        .collect())
}

#[derive(Clone)]
pub struct ReportService {
    appointment_repo: AppointmentRepository,
    order_repo: OrderRepository,
    utc_offset: FixedOffset,
}

impl ReportService {
    pub fn new(
        appointment_repo: AppointmentRepository,
        order_repo: OrderRepository,
        utc_offset: FixedOffset,
    ) -> Self {
        Self { appointment_repo, order_repo, utc_offset }
    }

    async fn fetch_realized(
        &self,
        conn: &mut PgConnection,
        shop_id: Uuid,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Result<(Vec<RealizedAppointment>, Vec<RealizedOrder>), AppError> {
        let range = local_day_range(start, end, self.utc_offset)?;

        let appointments = self.appointment_repo.list_realized(&mut *conn, shop_id, range).await?;
        let orders = self.order_repo.list_realized(&mut *conn, shop_id, range).await?;

        Ok((appointments, orders))
    }

    pub async fn revenue_summary(
        &self,
        conn: &mut PgConnection,
        shop_id: Uuid,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Result<RevenueSummary, AppError> {
        let (appointments, orders) = self.fetch_realized(conn, shop_id, start, end).await?;
        Ok(summarize_revenue(&appointments, &orders))
    }

    pub async fn daily(
        &self,
        conn: &mut PgConnection,
        shop_id: Uuid,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Result<Vec<DailyRevenue>, AppError> {
        ensure_daily_span(start, end)?;

        let (appointments, orders) = self.fetch_realized(conn, shop_id, start, end).await?;
        daily_revenue(&appointments, &orders, start, end, self.utc_offset)
    }

    pub async fn dashboard(
        &self,
        conn: &mut PgConnection,
        shop_id: Uuid,
    ) -> Result<DashboardSummary, AppError> {
        let today = local_today(self.utc_offset);
        let range = local_day_range(today, today, self.utc_offset)?;

        let revenue_today = self.revenue_summary(&mut *conn, shop_id, today, today).await?;
        let pending_appointments_today = self
            .appointment_repo
            .count_pending_scheduled(&mut *conn, shop_id, range)
            .await?;
        let open_orders = self.order_repo.count_open(&mut *conn, shop_id).await?;

        Ok(DashboardSummary {
            date: today,
            revenue_today,
            pending_appointments_today,
            open_orders,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        common::time::{parse_utc_offset, DEFAULT_UTC_OFFSET},
        models::appointment::AppointmentOrigin,
    };
    use chrono::{DateTime, TimeZone, Utc};

    fn dec(cents: i64) -> Decimal {
        Decimal::new(cents, 2)
    }

    fn at(y: i32, m: u32, d: u32, h: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(y, m, d, h, 0, 0).unwrap()
    }

    fn appointment(
        origin: AppointmentOrigin,
        service_id: Option<Uuid>,
        price: Option<Decimal>,
        item_price: Option<Decimal>,
    ) -> RealizedAppointment {
        RealizedAppointment {
            id: Uuid::new_v4(),
            service_id,
            origin,
            price,
            item_price,
            concluded_at: at(2024, 3, 10, 15),
        }
    }

    fn order(total: Decimal, created_at: DateTime<Utc>) -> RealizedOrder {
        RealizedOrder { id: Uuid::new_v4(), total, created_at }
    }

    #[test]
    fn explicit_price_wins_over_catalog_price() {
        let a = appointment(AppointmentOrigin::Normal, Some(Uuid::new_v4()), Some(dec(5000)), Some(dec(4000)));
        let summary = summarize_revenue(&[a], &[]);
        assert_eq!(summary.services_total, dec(5000));
    }

    #[test]
    fn missing_price_falls_back_to_catalog_price() {
        let a = appointment(AppointmentOrigin::Normal, Some(Uuid::new_v4()), None, Some(dec(4000)));
        let summary = summarize_revenue(&[a], &[]);
        assert_eq!(summary.services_total, dec(4000));

        let nothing = appointment(AppointmentOrigin::Normal, Some(Uuid::new_v4()), None, None);
        assert_eq!(summarize_revenue(&[nothing], &[]).realized_total, Decimal::ZERO);
    }

    #[test]
    fn quick_sale_counts_as_product_even_with_service() {
        let a = appointment(AppointmentOrigin::QuickSale, Some(Uuid::new_v4()), Some(dec(3000)), None);
        let summary = summarize_revenue(&[a], &[]);
        assert_eq!(summary.services_total, Decimal::ZERO);
        assert_eq!(summary.products_total, dec(3000));
    }

    #[test]
    fn realized_total_is_services_plus_products() {
        let apps = vec![
            appointment(AppointmentOrigin::Normal, Some(Uuid::new_v4()), Some(dec(5000)), None),
            appointment(AppointmentOrigin::Normal, None, Some(dec(2000)), None),
            appointment(AppointmentOrigin::QuickSale, None, Some(dec(1500)), None),
        ];
        let orders = vec![order(dec(8990), at(2024, 3, 10, 18))];

        let summary = summarize_revenue(&apps, &orders);
        assert_eq!(summary.services_total, dec(5000));
        assert_eq!(summary.products_total, dec(2000 + 1500 + 8990));
        assert_eq!(summary.realized_total, summary.services_total + summary.products_total);
        assert_eq!(summary.appointments_count, 3);
        assert_eq!(summary.orders_count, 1);
        assert_eq!(summary.transactions_count, 4);
    }

    #[test]
    fn average_ticket_divides_by_all_transactions() {
        let apps = vec![appointment(AppointmentOrigin::Normal, Some(Uuid::new_v4()), Some(dec(6000)), None)];
        let orders = vec![order(dec(3000), at(2024, 3, 10, 12))];

        let summary = summarize_revenue(&apps, &orders);
        assert_eq!(summary.average_ticket, dec(4500));
    }

    #[test]
    fn empty_period_has_zero_ticket() {
        assert_eq!(summarize_revenue(&[], &[]), RevenueSummary::default());
    }

    #[test]
    fn daily_series_includes_empty_days_and_uses_local_dates() {
        let offset = parse_utc_offset(DEFAULT_UTC_OFFSET).unwrap();
        let start = NaiveDate::from_ymd_opt(2024, 3, 9).unwrap();
        let end = NaiveDate::from_ymd_opt(2024, 3, 11).unwrap();

        // 02:00 UTC do dia 10 ainda é dia 9 em -03:00
        let mut late_night = appointment(AppointmentOrigin::Normal, Some(Uuid::new_v4()), Some(dec(5000)), None);
        late_night.concluded_at = at(2024, 3, 10, 2);
        let orders = vec![order(dec(2000), at(2024, 3, 11, 13))];

        let series = daily_revenue(&[late_night], &orders, start, end, offset).unwrap();

        let dates: Vec<_> = series.iter().map(|d| d.date.to_string()).collect();
        assert_eq!(dates, vec!["2024-03-09", "2024-03-10", "2024-03-11"]);
        assert_eq!(series[0].summary.services_total, dec(5000));
        assert_eq!(series[1].summary, RevenueSummary::default());
        assert_eq!(series[2].summary.products_total, dec(2000));
    }

    #[test]
    fn daily_series_refuses_huge_ranges_before_allocating() {
        let offset = parse_utc_offset(DEFAULT_UTC_OFFSET).unwrap();
        let start = NaiveDate::from_ymd_opt(1, 1, 1).unwrap();
        let end = NaiveDate::from_ymd_opt(9999, 12, 31).unwrap();

        let result = daily_revenue(&[], &[], start, end, offset);
        assert!(matches!(result, Err(AppError::DateRangeTooLong { .. })));
    }
}
