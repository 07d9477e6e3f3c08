//! Интеграционные тесты на данных, подготовленных `prepare`.

#[cfg(test)]
mod data;
#[cfg(test)]
mod fcd;
#[cfg(test)]
mod icu;
#[cfg(test)]
mod normalization;
#[cfg(test)]
mod properties;
#[cfg(test)]
mod proptests;
#[cfg(test)]
mod spans;
