mod availability_test;
mod doctor_test;
mod middleware_test;
mod records_test;
mod routes_test;
