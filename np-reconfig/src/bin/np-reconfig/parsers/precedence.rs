use std::io::BufReader;
use std::io::Read;

use np_reconfig_core::problem::Interval;
use np_reconfig_core::problem::JobId;
use np_reconfig_core::problem::PrecedenceConstraint;

use super::for_each_record;
use super::id_part;
use super::interval;
use super::JobSetParseError;

/// Parses a precedence CSV with the columns `From TID, From JID, To TID, To JID` and optionally
/// `Sus. min, Sus. max`.
pub(crate) fn parse_precedence_constraints(
    source: impl Read,
) -> Result<Vec<PrecedenceConstraint>, JobSetParseError> {
    let mut constraints = Vec::new();

    for_each_record(BufReader::new(source), |line, fields| {
        let (ids, suspension) = match fields {
            [ids @ .., min, max] if ids.len() == 4 => (ids, interval(line, *min, *max)?),
            ids if ids.len() == 4 => (ids, Interval::point(0)),
            _ => {
                return Err(JobSetParseError::WrongNumberOfFields {
                    line,
                    expected: "4 or 6",
                    found: fields.len(),
                })
            }
        };

        constraints.push(PrecedenceConstraint::new(
            JobId::new(id_part(line, ids[0])?, id_part(line, ids[1])?),
            JobId::new(id_part(line, ids[2])?, id_part(line, ids[3])?),
            suspension,
        ));
        Ok(())
    })?;

    Ok(constraints)
}
