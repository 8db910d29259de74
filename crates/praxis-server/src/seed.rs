// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights
// reserved. SPDX-License-Identifier: Proprietary

//! Startup seeding of baseline reference and demo data.
//!
//! Each block only runs when its table is empty, so seeding is idempotent
//! across restarts.

use chrono::NaiveDate;
use praxis_server_db::{
	DbError, NewAppointmentType, NewPatient, NewPractice, NewSpecialization,
};

use crate::api::AppState;

#[tracing::instrument(skip(state))]
pub async fn seed_database(state: &AppState) -> Result<(), DbError> {
	if state.practice_repo.count().await? == 0 {
		for practice in [
			NewPractice {
				name: "Fysio One".to_string(),
				address: Some("Main St 1".to_string()),
				postal_code: Some("1000AA".to_string()),
				city: Some("Amsterdam".to_string()),
				country: Some("Netherlands".to_string()),
				phone_number: Some("+31111111111".to_string()),
				email: Some("one@fysio.com".to_string()),
				website: Some("https://fysioone.com".to_string()),
				color: Some("#FF0000".to_string()),
			},
			NewPractice {
				name: "Fysio Two".to_string(),
				address: Some("Second St 2".to_string()),
				postal_code: Some("2000BB".to_string()),
				city: Some("Rotterdam".to_string()),
				country: Some("Netherlands".to_string()),
				phone_number: Some("+31222222222".to_string()),
				email: Some("two@fysio.com".to_string()),
				website: Some("https://fysiotwo.com".to_string()),
				color: Some("#00FF00".to_string()),
			},
		] {
			state.practice_repo.create(practice).await?;
		}
		tracing::info!("seeded practices");
	}

	if state.patient_repo.count().await? == 0 {
		for patient in [
			NewPatient {
				first_name: "John".to_string(),
				last_name: "Doe".to_string(),
				initials: Some("J.D.".to_string()),
				date_of_birth: NaiveDate::from_ymd_opt(1990, 1, 1),
				email: Some("john.doe@email.com".to_string()),
				phone_number: Some("0612345678".to_string()),
				address: Some("Patient St 1".to_string()),
				postal_code: Some("1234AB".to_string()),
				city: Some("Amsterdam".to_string()),
				country: Some("Netherlands".to_string()),
			},
			NewPatient {
				first_name: "Jane".to_string(),
				last_name: "Smith".to_string(),
				initials: Some("J.S.".to_string()),
				date_of_birth: NaiveDate::from_ymd_opt(1985, 5, 20),
				email: Some("jane.smith@email.com".to_string()),
				phone_number: Some("0687654321".to_string()),
				address: Some("Patient St 2".to_string()),
				postal_code: Some("4321BA".to_string()),
				city: Some("Rotterdam".to_string()),
				country: Some("Netherlands".to_string()),
			},
		] {
			state.patient_repo.create(patient).await?;
		}
		tracing::info!("seeded patients");
	}

	if state.specialization_repo.count().await? == 0 {
		for specialization in [
			NewSpecialization {
				name: "Manual Therapy".to_string(),
				description: Some("Joint and spine mobilization".to_string()),
			},
			NewSpecialization {
				name: "Sports Rehabilitation".to_string(),
				description: Some("Recovery from sports injuries".to_string()),
			},
		] {
			state.specialization_repo.create(specialization).await?;
		}
		tracing::info!("seeded specializations");
	}

	if state.appointment_type_repo.count().await? == 0 {
		for appointment_type in [
			NewAppointmentType {
				name: "Intake".to_string(),
				description: Some("First consultation".to_string()),
				color: Some("#3366FF".to_string()),
			},
			NewAppointmentType {
				name: "Treatment".to_string(),
				description: Some("Regular treatment session".to_string()),
				color: Some("#33CC66".to_string()),
			},
		] {
			state.appointment_type_repo.create(appointment_type).await?;
		}
		tracing::info!("seeded appointment types");
	}

	Ok(())
}

#[cfg(test)]
mod tests {
	use crate::api::testing::create_test_state;

	use super::*;

	#[tokio::test]
	async fn test_seed_populates_empty_tables() {
		let (state, _dir) = create_test_state().await;

		seed_database(&state).await.unwrap();

		assert_eq!(state.practice_repo.count().await.unwrap(), 2);
		assert_eq!(state.patient_repo.count().await.unwrap(), 2);
		assert_eq!(state.specialization_repo.count().await.unwrap(), 2);
		assert_eq!(state.appointment_type_repo.count().await.unwrap(), 2);
	}

	#[tokio::test]
	async fn test_seed_is_idempotent() {
		let (state, _dir) = create_test_state().await;

		seed_database(&state).await.unwrap();
		seed_database(&state).await.unwrap();

		assert_eq!(state.practice_repo.count().await.unwrap(), 2);
		assert_eq!(state.patient_repo.count().await.unwrap(), 2);
	}
}
