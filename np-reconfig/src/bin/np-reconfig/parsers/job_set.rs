use std::io::BufReader;
use std::io::Read;

use np_reconfig_core::problem::Job;
use np_reconfig_core::problem::JobId;

use super::for_each_record;
use super::id_part;
use super::interval;
use super::JobSetParseError;

/// Parses a job CSV with the columns
/// `Task ID, Job ID, Arrival min, Arrival max, Cost min, Cost max, Deadline, Priority`.
///
/// Jobs are indexed in the order in which they appear.
pub(crate) fn parse_job_set(source: impl Read) -> Result<Vec<Job>, JobSetParseError> {
    let mut jobs = Vec::new();

    for_each_record(BufReader::new(source), |line, fields| {
        let &[task, job, arrival_min, arrival_max, cost_min, cost_max, deadline, priority] =
            fields
        else {
            return Err(JobSetParseError::WrongNumberOfFields {
                line,
                expected: "8",
                found: fields.len(),
            });
        };

        jobs.push(Job::new(
            JobId::new(id_part(line, task)?, id_part(line, job)?),
            jobs.len(),
            interval(line, arrival_min, arrival_max)?,
            interval(line, cost_min, cost_max)?,
            deadline,
            priority,
        ));
        Ok(())
    })?;

    Ok(jobs)
}

#[cfg(test)]
mod tests {
    use np_reconfig_core::problem::Interval;

    use super::*;

    #[test]
    fn header_is_skipped_and_jobs_are_indexed_in_order() {
        let source = "Task ID,Job ID,Arrival min,Arrival max,Cost min,Cost max,Deadline,Priority\n\
                      1, 1, 0, 500, 104, 209, 2000, 2\n\
                      \n\
                      2,1,0,1000,39,79,10000,1\n";

        let jobs = parse_job_set(source.as_bytes()).expect("valid job set");

        assert_eq!(jobs.len(), 2);
        assert_eq!(jobs[0].id(), JobId::new(1, 1));
        assert_eq!(jobs[0].arrival(), Interval::new(0, 500));
        assert_eq!(jobs[0].cost(), Interval::new(104, 209));
        assert_eq!(jobs[0].deadline(), 2000);
        assert_eq!(jobs[1].id(), JobId::new(2, 1));
        assert_eq!(jobs[1].index(), 1);
        assert_eq!(jobs[1].priority(), 1);
    }

    #[test]
    fn missing_field_is_reported_with_its_line() {
        let source = "1,1,0,5,1,2,10\n";

        let error = parse_job_set(source.as_bytes()).expect_err("seven fields");

        assert!(matches!(
            error,
            JobSetParseError::WrongNumberOfFields {
                line: 1,
                found: 7,
                ..
            }
        ));
    }

    #[test]
    fn garbage_after_the_header_is_rejected() {
        let source = "Task ID,Job ID,Arrival min,Arrival max,Cost min,Cost max,Deadline,Priority\n\
                      1,1,zero,5,1,2,10,1\n";

        let error = parse_job_set(source.as_bytes()).expect_err("invalid number");

        assert!(matches!(
            error,
            JobSetParseError::InvalidNumber { line: 2, ref field } if field == "zero"
        ));
    }

    #[test]
    fn empty_interval_is_rejected() {
        let source = "1,1,6,5,1,2,10,1\n";

        let error = parse_job_set(source.as_bytes()).expect_err("arrival is empty");

        assert!(matches!(
            error,
            JobSetParseError::EmptyInterval {
                line: 1,
                min: 6,
                max: 5
            }
        ));
    }
}
