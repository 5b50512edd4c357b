//! Curated learning resources keyed by skill

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LearningResource {
    pub title: String,
    #[serde(rename = "type")]
    pub resource_type: ResourceType,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub provider: Option<String>,
    pub url: String,
    pub difficulty: String,
    pub duration_hours: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub relevance: Option<f64>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ResourceType {
    Course,
    Video,
    Search,
}

// (skill, type, title, provider or channel, url, difficulty, hours)
type CuratedRow = (
    &'static str,
    ResourceType,
    &'static str,
    &'static str,
    &'static str,
    &'static str,
    f64,
);

use ResourceType::{Course, Video};

const CURATED_RESOURCES: &[CuratedRow] = &[
    ("python", Course, "Python for Everybody", "Coursera", "https://www.coursera.org/specializations/python", "beginner", 40.0),
    ("python", Video, "Python Tutorial for Beginners", "Programming with Mosh", "https://www.youtube.com/watch?v=_uQrJ0TkZlc", "beginner", 6.0),
    ("javascript", Course, "JavaScript: Understanding the Weird Parts", "Udemy", "https://www.udemy.com/course/understand-javascript/", "intermediate", 12.0),
    ("javascript", Video, "JavaScript Full Course", "freeCodeCamp", "https://www.youtube.com/watch?v=PkZNo7MFNFg", "beginner", 3.0),
    ("typescript", Course, "Understanding TypeScript", "Udemy", "https://www.udemy.com/course/understanding-typescript/", "intermediate", 15.0),
    ("typescript", Video, "TypeScript Tutorial for Beginners", "Academind", "https://www.youtube.com/watch?v=BwuLxPH8IDs", "beginner", 3.0),
    ("react", Course, "React - The Complete Guide", "Udemy", "https://www.udemy.com/course/react-the-complete-guide-incl-redux/", "intermediate", 48.0),
    ("react", Video, "React JS Full Course", "freeCodeCamp", "https://www.youtube.com/watch?v=bMknfKXIFA8", "beginner", 12.0),
    ("node.js", Course, "The Complete Node.js Developer Course", "Udemy", "https://www.udemy.com/course/the-complete-nodejs-developer-course-2/", "intermediate", 35.0),
    ("node.js", Video, "Node.js Tutorial for Beginners", "Programming with Mosh", "https://www.youtube.com/watch?v=TlB_eWDSMt4", "beginner", 1.0),
    ("sql", Course, "The Complete SQL Bootcamp", "Udemy", "https://www.udemy.com/course/the-complete-sql-bootcamp/", "beginner", 9.0),
    ("sql", Video, "SQL Tutorial - Full Database Course", "freeCodeCamp", "https://www.youtube.com/watch?v=HXV3zeQKqGY", "beginner", 4.0),
    ("docker", Course, "Docker Mastery", "Udemy", "https://www.udemy.com/course/docker-mastery/", "intermediate", 20.0),
    ("docker", Video, "Docker Tutorial for Beginners", "TechWorld with Nana", "https://www.youtube.com/watch?v=3c-iBn73dDE", "beginner", 3.0),
    ("aws", Course, "AWS Certified Solutions Architect", "Udemy", "https://www.udemy.com/course/aws-certified-solutions-architect-associate/", "intermediate", 27.0),
    ("aws", Video, "AWS Tutorial For Beginners", "Simplilearn", "https://www.youtube.com/watch?v=k1RI5locZE4", "beginner", 4.0),
    ("kubernetes", Course, "Kubernetes for the Absolute Beginners", "Udemy", "https://www.udemy.com/course/learn-kubernetes/", "beginner", 6.0),
    ("kubernetes", Video, "Kubernetes Tutorial for Beginners", "TechWorld with Nana", "https://www.youtube.com/watch?v=X48VuDVv0do", "beginner", 4.0),
    ("git", Course, "Git Complete: The definitive guide", "Udemy", "https://www.udemy.com/course/git-complete/", "beginner", 6.0),
    ("git", Video, "Git and GitHub for Beginners", "freeCodeCamp", "https://www.youtube.com/watch?v=RGOj5yH7evk", "beginner", 1.0),
    ("machine learning", Course, "Machine Learning by Andrew Ng", "Coursera", "https://www.coursera.org/learn/machine-learning", "intermediate", 60.0),
    ("machine learning", Video, "Machine Learning Course for Beginners", "freeCodeCamp", "https://www.youtube.com/watch?v=NWONeJKn6kc", "beginner", 10.0),
    ("pandas", Course, "Data Analysis with Pandas and Python", "Udemy", "https://www.udemy.com/course/data-analysis-with-pandas/", "beginner", 19.0),
    ("pandas", Video, "Pandas Tutorial", "Corey Schafer", "https://www.youtube.com/watch?v=ZyhVh-qRZPA", "beginner", 6.0),
    ("scikit-learn", Course, "Scikit-Learn For Machine Learning", "Udemy", "https://www.udemy.com/course/machine-learning-with-scikit-learn/", "intermediate", 8.0),
    ("scikit-learn", Video, "Scikit-Learn Tutorial", "freeCodeCamp", "https://www.youtube.com/watch?v=0B5eIE_1vpU", "beginner", 3.0),
    ("tensorflow", Course, "TensorFlow Developer Certificate", "Coursera", "https://www.coursera.org/professional-certificates/tensorflow-in-practice", "intermediate", 40.0),
    ("tensorflow", Video, "TensorFlow 2.0 Complete Course", "freeCodeCamp", "https://www.youtube.com/watch?v=tPYj3fFJGjk", "intermediate", 7.0),
    ("next.js", Course, "Next.js & React - The Complete Guide", "Udemy", "https://www.udemy.com/course/nextjs-react-the-complete-guide/", "intermediate", 25.0),
    ("next.js", Video, "Next.js Tutorial for Beginners", "Traversy Media", "https://www.youtube.com/watch?v=mTz0GXj8NN0", "beginner", 1.0),
    ("rest api", Video, "REST API Design Best Practices", "Traversy Media", "https://www.youtube.com/watch?v=Q-BpqyOT3a8", "beginner", 1.0),
    ("testing", Course, "Testing JavaScript", "TestingJavaScript.com", "https://testingjavascript.com/", "intermediate", 12.0),
    ("testing", Video, "Unit Testing Tutorial", "Fireship", "https://www.youtube.com/watch?v=u6QfIXgjwGQ", "beginner", 0.5),
    ("ci/cd", Video, "CI/CD Pipeline Tutorial", "TechWorld with Nana", "https://www.youtube.com/watch?v=scEDHsr3APg", "intermediate", 2.0),
    ("graphql", Course, "GraphQL with React: The Complete Developers Guide", "Udemy", "https://www.udemy.com/course/graphql-with-react-course/", "intermediate", 13.0),
    ("graphql", Video, "GraphQL Full Course", "freeCodeCamp", "https://www.youtube.com/watch?v=ed8SzALpx1Q", "beginner", 4.0),
    ("linux", Course, "Linux Mastery", "Udemy", "https://www.udemy.com/course/linux-mastery/", "beginner", 12.0),
    ("linux", Video, "Linux for Beginners", "freeCodeCamp", "https://www.youtube.com/watch?v=sWbUDq4S6Y8", "beginner", 3.0),
    ("terraform", Course, "HashiCorp Certified: Terraform Associate", "Udemy", "https://www.udemy.com/course/terraform-beginner-to-advanced/", "intermediate", 13.0),
    ("html", Video, "HTML Full Course", "freeCodeCamp", "https://www.youtube.com/watch?v=pQN-pnXPaVg", "beginner", 2.0),
    ("css", Video, "CSS Tutorial - Full Course", "freeCodeCamp", "https://www.youtube.com/watch?v=1Rs2ND1ryYc", "beginner", 11.0),
    ("tailwind", Video, "Tailwind CSS Full Course", "Traversy Media", "https://www.youtube.com/watch?v=dFgzHOX84xQ", "beginner", 3.0),
];

/// Static skill -> resources table used when no recommender is loaded, or
/// when it has nothing for a skill.
#[derive(Debug, Clone)]
pub struct CuratedResources {
    by_skill: HashMap<&'static str, Vec<LearningResource>>,
}

impl Default for CuratedResources {
    fn default() -> Self {
        Self::builtin()
    }
}

impl CuratedResources {
    pub fn builtin() -> Self {
        let mut by_skill: HashMap<&'static str, Vec<LearningResource>> = HashMap::new();
        for (skill, resource_type, title, provider, url, difficulty, hours) in CURATED_RESOURCES {
            by_skill.entry(*skill).or_default().push(LearningResource {
                title: title.to_string(),
                resource_type: *resource_type,
                provider: Some(provider.to_string()),
                url: url.to_string(),
                difficulty: difficulty.to_string(),
                duration_hours: *hours,
                relevance: None,
            });
        }
        Self { by_skill }
    }

    pub fn get(&self, skill: &str) -> Option<&[LearningResource]> {
        self.by_skill.get(skill).map(Vec::as_slice)
    }

    pub fn skill_count(&self) -> usize {
        self.by_skill.len()
    }
}

/// Search-style resource synthesized for skills nobody curated.
pub fn generic_search_resource(skill: &str) -> LearningResource {
    LearningResource {
        title: format!("Learn {}", skill),
        resource_type: ResourceType::Search,
        provider: Some("Google".to_string()),
        url: format!("https://www.google.com/search?q=learn+{}", skill.replace(' ', "+")),
        difficulty: "beginner".to_string(),
        duration_hours: 10.0,
        relevance: None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_curated_lookup() {
        let curated = CuratedResources::builtin();
        let python = curated.get("python").unwrap();

        assert_eq!(python.len(), 2);
        assert_eq!(python[0].resource_type, ResourceType::Course);
        assert!(curated.get("cobol").is_none());
    }

    #[test]
    fn test_generic_search_resource_escapes_spaces() {
        let resource = generic_search_resource("spring boot");
        assert_eq!(resource.title, "Learn spring boot");
        assert_eq!(resource.url, "https://www.google.com/search?q=learn+spring+boot");
        assert_eq!(resource.resource_type, ResourceType::Search);
    }

    #[test]
    fn test_resource_serializes_type_field() {
        let json = serde_json::to_value(generic_search_resource("go")).unwrap();
        assert_eq!(json["type"], "search");
        assert!(json.get("relevance").is_none());
    }
}
