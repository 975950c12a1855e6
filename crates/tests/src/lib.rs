#[cfg(test)]
mod common;


#[cfg(test)]
mod lookup_tests;



#[cfg(test)]
mod job_order_submit_tests;

#[cfg(test)]
mod service_order_submit_tests;

#[cfg(test)]
mod network_asset_tests;
