//! Newest-first paginated listing with early stop
//!
//! Pages are walked from 1 upward. The walk stops at the first order at or below the
//! checkpoint, since everything after it was synced by an earlier run.

use super::run_state::RunState;
use super::summary::SkipLedger;
use crate::adapters::tiny::{Fetch, OrderPage, TinyClient};
use crate::domain::OrderSummary;

/// Orders newer than the checkpoint, in listing order
#[derive(Debug, Clone, Default)]
pub struct Listing {
    pub orders: Vec<OrderSummary>,

    /// Total pages reported by the first listing page
    pub total_pages: u32,

    /// Pages fetched successfully
    pub pages_fetched: u32,

    /// The first page never answered
    pub source_unavailable: bool,
}

/// Walks the order listing for one run
pub struct OrderLister<'a> {
    client: &'a TinyClient,
    max_pages: Option<u32>,
}

impl<'a> OrderLister<'a> {
    /// `max_pages` caps how many pages are walked
    pub fn new(client: &'a TinyClient, max_pages: Option<u32>) -> Self {
        Self { client, max_pages }
    }

    /// Collect every order newer than `state.prior()`
    ///
    /// Each listed order, including the one that hits the boundary, feeds the running
    /// maximum in `state`. Pages that stay unavailable after retries are recorded in
    /// `skips` and passed over, as are unreadable entries newer than the checkpoint.
    pub async fn list_new_orders(&self, state: &mut RunState, skips: &mut SkipLedger) -> Listing {
        let mut listing = Listing::default();

        let first = match self.client.search_page(1).await {
            Fetch::Ready(page) => page,
            Fetch::Unavailable {
                attempts,
                last_error,
            } => {
                tracing::error!(
                    attempts = attempts,
                    error = %last_error,
                    "Order listing unavailable, nothing to sync this run"
                );
                skips.record_page(1, attempts, &last_error);
                listing.source_unavailable = true;
                return listing;
            }
        };

        // A page carrying orders counts as at least one page
        let total_pages = first.total_pages.max(u32::from(!first.orders.is_empty()));
        listing.total_pages = total_pages;
        let last_page = match self.max_pages {
            Some(cap) if cap < total_pages => {
                tracing::warn!(
                    total_pages = total_pages,
                    max_pages = cap,
                    "Listing capped by sync.max_pages"
                );
                cap
            }
            _ => total_pages,
        };

        tracing::info!(
            total_pages = total_pages,
            checkpoint = %state.prior(),
            "Listing orders newest first"
        );

        if last_page == 0 {
            return listing;
        }

        listing.pages_fetched += 1;
        if self.scan_page(first, state, &mut listing.orders, skips) {
            return listing;
        }

        for page_number in 2..=last_page {
            let page = match self.client.search_page(page_number).await {
                Fetch::Ready(page) => page,
                Fetch::Unavailable {
                    attempts,
                    last_error,
                } => {
                    tracing::warn!(
                        page = page_number,
                        error = %last_error,
                        "Skipping unavailable listing page"
                    );
                    skips.record_page(page_number, attempts, &last_error);
                    continue;
                }
            };

            listing.pages_fetched += 1;
            if self.scan_page(page, state, &mut listing.orders, skips) {
                break;
            }
        }

        listing
    }

    /// Returns `true` once the boundary is reached
    fn scan_page(
        &self,
        page: OrderPage,
        state: &mut RunState,
        orders: &mut Vec<OrderSummary>,
        skips: &mut SkipLedger,
    ) -> bool {
        let listed = page.orders.len();

        // Unreadable entries at or below the checkpoint only mark the boundary
        let mut boundary_reached = false;
        for entry in &page.rejected {
            match entry.sequence_number {
                Some(sequence_number) if state.observe(sequence_number) => {
                    boundary_reached = true;
                }
                _ => skips.record_listing_entry(
                    page.page,
                    entry.sequence_number,
                    entry.order_id.clone(),
                    &entry.reason,
                ),
            }
        }

        for order in page.orders {
            if state.observe(order.sequence_number) {
                tracing::info!(
                    page = page.page,
                    sequence_number = %order.sequence_number,
                    "Reached already-synced order, stopping listing"
                );
                return true;
            }
            orders.push(order);
        }

        tracing::debug!(
            page = page.page,
            listed = listed,
            rejected = page.rejected.len(),
            "Listing page scanned"
        );
        boundary_reached
    }
}
