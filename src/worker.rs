//! Customer and staff role loops.
//!
//! The engine itself is the [`Shop`] operations; these loops are the
//! thin driver each worker thread runs. A customer submits its batches
//! one at a time — each order waits for pickup before the next is placed
//! — then departs. A staff member serves until [`Shop::take_order`]
//! returns the terminal sentinel.

use crate::order::Tint;
use crate::shop::Shop;

/// Runs one customer to completion: order each batch, wait for it, then
/// depart.
pub fn run_customer(shop: &Shop, batches: &[Vec<Tint>]) {
    for batch in batches {
        let can = shop.order(batch);
        shop.submit_and_wait(&can);
    }
    shop.depart();
    tracing::debug!(orders = batches.len(), "customer went home");
}

/// Runs one staff member to completion. Returns the number of orders
/// served.
pub fn run_staff(shop: &Shop) -> usize {
    let mut served = 0;
    while let Some(can) = shop.take_order() {
        shop.fill_order(&can);
        shop.serve_order(can);
        served += 1;
    }
    tracing::debug!(served, "staff member went home");
    served
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ShopConfig;
    use crate::test_utils::{init_test_logging, tints};
    use std::sync::Arc;

    fn init_test(name: &str) {
        init_test_logging();
        crate::test_phase!(name);
    }

    #[test]
    fn one_customer_one_staff_round_trip() {
        init_test("one_customer_one_staff_round_trip");
        let shop = Shop::open(ShopConfig {
            customers: 1,
            staff: 1,
            tints: 4,
            paint_complexity: 3,
        })
        .expect("shop should open");

        let staff = {
            let shop = Arc::clone(&shop);
            std::thread::spawn(move || run_staff(&shop))
        };

        run_customer(&shop, &[tints(&[1, 2]), tints(&[3])]);

        let served = staff.join().expect("staff thread failed");
        crate::assert_with_log!(served == 2, "orders served", 2usize, served);
        let stats = shop.close().expect("close after consensus");
        crate::assert_with_log!(
            stats.orders_submitted == 2,
            "orders submitted",
            2u64,
            stats.orders_submitted
        );
        crate::test_complete!("one_customer_one_staff_round_trip");
    }
}
