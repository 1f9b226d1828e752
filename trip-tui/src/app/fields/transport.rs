use plan_items::domain::FlightEntryMode;
use plan_items::draft::labels::*;
use plan_items::draft::{
    CarDraft, FlightDraft, GroundDraft, LocalTransportDraft, PrincipalMode, TransportDraft,
    TransportLeg,
};

use super::{cost_row, FieldId, FieldInput, FieldRow, FieldSpec};

pub(super) fn entry_mode(draft: &TransportDraft) -> Option<FlightEntryMode> {
    match &draft.leg {
        TransportLeg::Principal(Some(PrincipalMode::Flight(flight))) => Some(flight.entry_mode()),
        _ => None,
    }
}

/// Kind and mode are fixed once the item exists; so is the flight entry mode.
pub(super) fn rows(draft: &TransportDraft, editing: bool) -> Vec<FieldRow> {
    let kind = FieldSpec::choice(FieldId::Kind, KIND, Some(draft.kind()));
    let mode = FieldSpec::choice(FieldId::Mode, MODE, draft.mode());
    let mut rows = match (&draft.leg, editing) {
        (TransportLeg::Local(_), false) => vec![FieldRow::Single(kind)],
        (TransportLeg::Local(_), true) => vec![],
        (TransportLeg::Principal(_), false) => vec![FieldRow::Row2(kind, mode)],
        (TransportLeg::Principal(_), true) => vec![FieldRow::Single(mode)],
    };

    match &draft.leg {
        TransportLeg::Local(local) => rows.extend(local_rows(local)),
        TransportLeg::Principal(None) => return rows,
        TransportLeg::Principal(Some(PrincipalMode::Flight(flight))) => {
            if !editing {
                rows.push(FieldRow::Single(FieldSpec::choice(
                    FieldId::EntryMode,
                    ENTRY_MODE,
                    Some(flight.entry_mode()),
                )));
            }
            rows.extend(flight_rows(flight));
        }
        TransportLeg::Principal(Some(PrincipalMode::Train(ground)))
        | TransportLeg::Principal(Some(PrincipalMode::Bus(ground))) => {
            rows.extend(ground_rows(ground))
        }
        TransportLeg::Principal(Some(PrincipalMode::Car(car))) => rows.extend(car_rows(car)),
    }
    rows.push(cost_row(&draft.cost, &draft.currency));
    rows
}

fn local_rows(local: &LocalTransportDraft) -> Vec<FieldRow> {
    vec![
        FieldRow::Single(FieldSpec::required_text(FieldId::Title, TITLE, &local.title)),
        FieldRow::Single(FieldSpec::text(FieldId::Location, LOCATION, &local.location)),
        FieldRow::Row2(
            FieldSpec::datetime(FieldId::Start, START, local.start_at, false),
            FieldSpec::datetime(FieldId::End, END, local.end_at, false),
        ),
        FieldRow::Single(FieldSpec::text(FieldId::Notes, NOTES, &local.notes)),
    ]
}

fn flight_rows(flight: &FlightDraft) -> Vec<FieldRow> {
    match flight {
        FlightDraft::Autofill {
            flight_number,
            date,
        } => vec![FieldRow::Row2(
            FieldSpec::required_text(FieldId::FlightNumber, FLIGHT_NUMBER, flight_number),
            FieldSpec::date(FieldId::FlightDate, FLIGHT_DATE, *date, true),
        )],
        FlightDraft::Manual {
            flight_number,
            airline,
            from,
            to,
            departure_at,
            arrival_at,
            ..
        } => vec![
            FieldRow::Row2(
                FieldSpec::required_text(FieldId::FlightNumber, FLIGHT_NUMBER, flight_number),
                FieldSpec::text(FieldId::Airline, AIRLINE, airline),
            ),
            FieldRow::Row2(
                FieldSpec::text(FieldId::From, FROM, from),
                FieldSpec::text(FieldId::To, TO, to),
            ),
            FieldRow::Row2(
                FieldSpec::datetime(FieldId::Departure, DEPARTURE, *departure_at, true),
                FieldSpec::datetime(FieldId::Arrival, ARRIVAL, *arrival_at, true),
            ),
        ],
    }
}

fn ground_rows(ground: &GroundDraft) -> Vec<FieldRow> {
    vec![
        FieldRow::Single(FieldSpec::required_text(FieldId::Company, COMPANY, &ground.company)),
        FieldRow::Row2(
            FieldSpec::required_text(FieldId::From, FROM, &ground.from),
            FieldSpec::required_text(FieldId::To, TO, &ground.to),
        ),
        FieldRow::Row2(
            FieldSpec::datetime(FieldId::Departure, DEPARTURE, ground.departure_at, true),
            FieldSpec::datetime(FieldId::Arrival, ARRIVAL, ground.arrival_at, true),
        ),
        FieldRow::Single(FieldSpec::text(FieldId::BookingRef, BOOKING_REF, &ground.booking_ref)),
    ]
}

fn car_rows(car: &CarDraft) -> Vec<FieldRow> {
    vec![
        FieldRow::Row2(
            FieldSpec::required_text(FieldId::From, FROM, &car.from),
            FieldSpec::required_text(FieldId::To, TO, &car.to),
        ),
        FieldRow::Row2(
            FieldSpec::datetime(FieldId::Departure, DEPARTURE, car.departure_at, true),
            FieldSpec::datetime(FieldId::Arrival, ARRIVAL, car.arrival_at, true),
        ),
    ]
}

pub(super) fn apply(draft: &mut TransportDraft, id: FieldId, input: FieldInput) {
    match id {
        FieldId::Cost => draft.cost = input.into_text(),
        FieldId::Currency => draft.currency = input.into_text(),
        _ => match &mut draft.leg {
            TransportLeg::Local(local) => apply_local(local, id, input),
            TransportLeg::Principal(Some(mode)) => apply_principal(mode, id, input),
            TransportLeg::Principal(None) => {}
        },
    }
}

fn apply_local(local: &mut LocalTransportDraft, id: FieldId, input: FieldInput) {
    match id {
        FieldId::Title => local.title = input.into_text(),
        FieldId::Location => local.location = input.into_text(),
        FieldId::Start => local.start_at = input.into_instant(),
        FieldId::End => local.end_at = input.into_instant(),
        FieldId::Notes => local.notes = input.into_text(),
        _ => {}
    }
}

fn apply_principal(mode: &mut PrincipalMode, id: FieldId, input: FieldInput) {
    match mode {
        PrincipalMode::Flight(FlightDraft::Autofill {
            flight_number,
            date,
        }) => match id {
            FieldId::FlightNumber => *flight_number = input.into_text(),
            FieldId::FlightDate => *date = input.into_date(),
            _ => {}
        },
        PrincipalMode::Flight(FlightDraft::Manual {
            flight_number,
            airline,
            from,
            to,
            departure_at,
            arrival_at,
            ..
        }) => match id {
            FieldId::FlightNumber => *flight_number = input.into_text(),
            FieldId::Airline => *airline = input.into_text(),
            FieldId::From => *from = input.into_text(),
            FieldId::To => *to = input.into_text(),
            FieldId::Departure => *departure_at = input.into_instant(),
            FieldId::Arrival => *arrival_at = input.into_instant(),
            _ => {}
        },
        PrincipalMode::Train(ground) | PrincipalMode::Bus(ground) => match id {
            FieldId::Company => ground.company = input.into_text(),
            FieldId::From => ground.from = input.into_text(),
            FieldId::To => ground.to = input.into_text(),
            FieldId::Departure => ground.departure_at = input.into_instant(),
            FieldId::Arrival => ground.arrival_at = input.into_instant(),
            FieldId::BookingRef => ground.booking_ref = input.into_text(),
            _ => {}
        },
        PrincipalMode::Car(car) => match id {
            FieldId::From => car.from = input.into_text(),
            FieldId::To => car.to = input.into_text(),
            FieldId::Departure => car.departure_at = input.into_instant(),
            FieldId::Arrival => car.arrival_at = input.into_instant(),
            _ => {}
        },
    }
}
