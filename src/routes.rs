use actix_web::web;

use crate::handlers::{attendance, earnings, rates, wallets, withdrawals};

pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api/v1")
            .service(
                web::scope("/rates")
                    .route("", web::post().to(rates::set_rate))
                    .route("/{staff_id}", web::get().to(rates::get_active_rate))
                    .route("/{staff_id}/history", web::get().to(rates::get_rate_history)),
            )
            .service(
                web::scope("/attendance")
                    .route("", web::post().to(attendance::record_attendance))
                    .route("/{id}", web::get().to(attendance::get_attendance))
                    .route("/{id}/decide", web::post().to(attendance::decide_attendance)),
            )
            .service(
                web::scope("/earnings")
                    .route("", web::get().to(earnings::get_earnings))
                    .route("/{id}", web::get().to(earnings::get_earning))
                    .route("/{id}/credit", web::post().to(earnings::credit_earning))
                    .route("/{id}/reject", web::post().to(earnings::reject_earning)),
            )
            .service(
                web::scope("/wallets")
                    .route("/{staff_id}", web::get().to(wallets::get_wallet_summary)),
            )
            .service(
                web::scope("/withdrawals")
                    .route("", web::post().to(withdrawals::request_withdrawal))
                    .route("", web::get().to(withdrawals::get_withdrawals))
                    .route("/{id}", web::get().to(withdrawals::get_withdrawal))
                    .route("/{id}/decide", web::post().to(withdrawals::decide_withdrawal))
                    .route(
                        "/{id}/complete",
                        web::post().to(withdrawals::complete_withdrawal),
                    ),
            ),
    );
}
