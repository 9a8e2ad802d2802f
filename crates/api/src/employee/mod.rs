mod create_employee;
mod set_device_token;

use actix_web::web;
use create_employee::create_employee_controller;
use set_device_token::set_device_token_controller;

pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.route("/employees", web::post().to(create_employee_controller));
    cfg.route(
        "/employees/device-token",
        web::put().to(set_device_token_controller),
    );
}
